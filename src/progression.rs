//! Experience, levelling, move learning, and evolution.

use crate::battle::state::{BattleEvent, EventBus};
use crate::creature::{CreatureInst, MAX_LEVEL};
use crate::species_data::get_species_data;
use schema::Species;

/// Experience gain divisor in the classic yield formula.
const EXP_GAIN_DIVISOR: u32 = 7;

/// Total experience required to reach a level (medium-fast cubic curve).
pub fn exp_for_level(level: u8) -> u32 {
    (level as u32).pow(3)
}

/// Experience progress within the current level, for HP-bar style gauges.
pub fn exp_progress(creature: &CreatureInst) -> (u32, u32) {
    let current_floor = exp_for_level(creature.level);
    let next = exp_for_level(creature.level + 1);
    (creature.exp - current_floor, next - current_floor)
}

/// Experience awarded for defeating a creature: base yield scaled by level.
pub fn exp_gain_for_defeating(defeated: &CreatureInst) -> u32 {
    let base_exp = get_species_data(defeated.species).base_exp as u32;
    (base_exp * defeated.level as u32) / EXP_GAIN_DIVISOR
}

/// Grant experience, processing any level-ups: stats are recomputed (the
/// creature heals by the max-HP gain) and newly reached learnset moves are
/// learned, each with its own event.
pub fn award_experience(creature: &mut CreatureInst, gain: u32, bus: &mut EventBus) {
    bus.push(BattleEvent::ExpGained { amount: gain });
    creature.exp += gain;

    while creature.level < MAX_LEVEL && creature.exp >= exp_for_level(creature.level + 1) {
        creature.level += 1;
        creature.recalculate_stats();

        bus.push(BattleEvent::LeveledUp {
            name: creature.name().to_string(),
            level: creature.level,
        });

        learn_level_moves(creature, creature.level, bus);
    }
}

/// Level-based evolution check. Returns the target species when due.
pub fn check_evolution(creature: &CreatureInst) -> Option<Species> {
    let evolution = get_species_data(creature.species).evolution.as_ref()?;
    (creature.level >= evolution.level).then_some(evolution.evolves_into)
}

/// Evolve into a new species: stats are recomputed for the new form with
/// current HP kept at the same ratio, and the new form's moves at the
/// current level are picked up.
pub fn evolve(creature: &mut CreatureInst, new_species: Species, bus: &mut EventBus) {
    let old_name = creature.name().to_string();
    bus.push(BattleEvent::Evolving {
        old_name: old_name.clone(),
    });

    let hp_ratio = creature.current_hp as f64 / creature.max_hp() as f64;
    creature.species = new_species;
    creature.stats =
        crate::creature::calculate_stats(&get_species_data(new_species).base_stats, creature.level);
    creature.current_hp = ((creature.max_hp() as f64 * hp_ratio).floor() as u16).max(1);

    bus.push(BattleEvent::Evolved {
        old_name,
        new_species,
    });

    learn_level_moves(creature, creature.level, bus);
}

fn learn_level_moves(creature: &mut CreatureInst, level: u8, bus: &mut EventBus) {
    let new_moves: Vec<_> = get_species_data(creature.species)
        .learnset
        .learns_at_level(level)
        .collect();

    for move_ in new_moves {
        if creature.known_moves().any(|m| m == move_) {
            continue;
        }
        creature.learn_move(move_);
        bus.push(BattleEvent::MoveLearned {
            name: creature.name().to_string(),
            move_learned: move_,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::Move;

    #[test]
    fn cubic_curve() {
        assert_eq!(exp_for_level(1), 1);
        assert_eq!(exp_for_level(10), 1000);
        assert_eq!(exp_for_level(100), 1_000_000);
    }

    #[test]
    fn exp_gain_scales_with_level() {
        let low = CreatureInst::new(Species::Nurse, 5);
        let high = CreatureInst::new(Species::Nurse, 50);
        assert!(exp_gain_for_defeating(&high) > exp_gain_for_defeating(&low));
        // base_exp 50 at level 7: 50 * 7 / 7 = 50.
        let exact = CreatureInst::new(Species::Nurse, 7);
        assert_eq!(exp_gain_for_defeating(&exact), 50);
    }

    #[test]
    fn level_up_recomputes_stats_and_learns_moves() {
        let mut creature = CreatureInst::new(Species::Lemon, 7);
        let old_attack = creature.stats.attack;
        let mut bus = EventBus::new();

        // Enough to reach level 8, where Lemon Shark learns Mud Shot.
        let needed = exp_for_level(8) - creature.exp;
        award_experience(&mut creature, needed, &mut bus);

        assert_eq!(creature.level, 8);
        assert!(creature.stats.attack >= old_attack);
        assert!(creature.known_moves().any(|m| m == Move::MudShot));

        let lines: Vec<_> = bus.events().iter().filter_map(|e| e.format()).collect();
        assert!(lines.contains(&"Lemon Shark grew to LV 8!".to_string()));
        assert!(lines.contains(&"Lemon Shark learned MUD SHOT!".to_string()));
    }

    #[test]
    fn multi_level_gain_processes_each_level() {
        let mut creature = CreatureInst::new(Species::Nurse, 4);
        let mut bus = EventBus::new();

        let needed = exp_for_level(6) - creature.exp;
        award_experience(&mut creature, needed, &mut bus);
        assert_eq!(creature.level, 6);

        let level_ups = bus
            .events()
            .iter()
            .filter(|e| matches!(e, BattleEvent::LeveledUp { .. }))
            .count();
        assert_eq!(level_ups, 2);
    }

    #[test]
    fn evolution_at_threshold_level() {
        let creature = CreatureInst::new(Species::Blacknose, 15);
        assert_eq!(check_evolution(&creature), None);

        let ready = CreatureInst::new(Species::Blacknose, 16);
        assert_eq!(check_evolution(&ready), Some(Species::BlacktipReef));
    }

    #[test]
    fn evolve_keeps_hp_ratio() {
        let mut creature = CreatureInst::new(Species::Blacknose, 16);
        creature.current_hp = creature.max_hp() / 2;
        let mut bus = EventBus::new();

        evolve(&mut creature, Species::BlacktipReef, &mut bus);

        assert_eq!(creature.species, Species::BlacktipReef);
        let ratio = creature.current_hp as f64 / creature.max_hp() as f64;
        assert!((ratio - 0.5).abs() < 0.1);

        let lines: Vec<_> = bus.events().iter().filter_map(|e| e.format()).collect();
        assert_eq!(lines[0], "What? Blacknose Shark is evolving!");
        assert_eq!(lines[1], "Blacknose Shark evolved into Blacktip Reef Shark!");
    }

    #[test]
    fn exp_never_levels_past_cap() {
        let mut creature = CreatureInst::new(Species::Nurse, 99);
        let mut bus = EventBus::new();
        award_experience(&mut creature, 100_000_000, &mut bus);
        assert_eq!(creature.level, MAX_LEVEL);
    }
}
