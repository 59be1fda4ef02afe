//! Turn resolution: the exchange of (up to) two actions, ordered by priority
//! and speed, with faint short-circuiting and end-of-turn status ticks.
//!
//! The whole turn is computed eagerly and synchronously; the caller renders
//! the resulting events one at a time. Once submitted, a turn runs to
//! completion - there is no mid-turn cancellation.

use crate::battle::catch::{
    attempt_capture, can_attempt_catch, capture_probability, PARTY_LIMIT,
};
use crate::battle::damage::calculate_damage;
use crate::battle::state::{
    BattleEvent, BattleKind, BattleOutcome, BattlePhase, BattleSide, BattleState, EventBus,
    SideId, TurnRng,
};
use crate::battle::stats::{effective_speed, move_hits};
use crate::battle::status::{apply_end_of_turn_damage, check_can_act, try_apply_status};
use crate::creature::StatusCondition;
use crate::move_data::get_move_data;
use crate::progression::{award_experience, check_evolution, evolve, exp_gain_for_defeating};
use crate::species_data::get_species_data;
use schema::{Item, ItemKind, Move, MoveCategory, MoveEffect, StatusCure, Target};

// Flee odds: (speed * 128 / opponent_speed + 30 * attempts) out of 256,
// guaranteed when not slower than the opponent.
pub const FLEE_SPEED_SCALE: u32 = 128;
pub const FLEE_ATTEMPT_BONUS: u32 = 30;
pub const FLEE_ODDS_DENOMINATOR: u32 = 256;

/// One side's resolved intent for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Attack { move_index: usize },
    UseItem { item: Item },
    Switch { team_index: usize },
    Flee,
}

/// Resolve one full turn. Switching, item use, and flee attempts resolve
/// before any attack and are never speed-ordered against one; a failed item
/// or flee still grants the opponent its action.
pub fn resolve_turn(
    state: &mut BattleState,
    player_action: TurnAction,
    enemy_action: TurnAction,
    rng: &mut TurnRng,
) -> EventBus {
    let mut bus = EventBus::new();
    state.phase = BattlePhase::Resolving;
    bus.push(BattleEvent::TurnStarted {
        turn_number: state.turn_number,
    });

    match player_action {
        TurnAction::Attack { move_index } => {
            resolve_attack_exchange(state, move_index, enemy_action, rng, &mut bus);
        }
        TurnAction::Switch { team_index } => {
            execute_switch(state, team_index, &mut bus);
            enemy_free_action(state, enemy_action, rng, &mut bus);
        }
        TurnAction::UseItem { item } => {
            let battle_ended = execute_item(state, item, rng, &mut bus);
            if !battle_ended {
                enemy_free_action(state, enemy_action, rng, &mut bus);
            }
        }
        TurnAction::Flee => {
            let escaped = execute_flee(state, rng, &mut bus);
            if !escaped {
                enemy_free_action(state, enemy_action, rng, &mut bus);
            }
        }
    }

    if state.outcome.is_none() {
        run_end_of_turn(state, &mut bus);
    }

    state.turn_number += 1;
    bus
}

/// A replacement after a faint is free: the opponent does not act. Used by
/// the session for the forced-switch phase.
pub fn execute_forced_replacement(state: &mut BattleState, team_index: usize) -> EventBus {
    let mut bus = EventBus::new();
    let side = state.side_mut(SideId::Player);
    side.switch_to(team_index);
    bus.push(BattleEvent::GoCreature {
        name: side.active().name().to_string(),
        hp: side.active().current_hp,
    });
    bus
}

fn resolve_attack_exchange(
    state: &mut BattleState,
    player_move_index: usize,
    enemy_action: TurnAction,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let TurnAction::Attack { move_index: enemy_move_index } = enemy_action else {
        // Opposing sides only ever attack; anything else forfeits the action.
        execute_attack(state, SideId::Player, player_move_index, rng, bus);
        process_faints(state, bus);
        return;
    };

    let order = determine_order(state, player_move_index, enemy_move_index);
    let move_index_for = |side: SideId| match side {
        SideId::Player => player_move_index,
        SideId::Enemy => enemy_move_index,
    };

    execute_attack(state, order[0], move_index_for(order[0]), rng, bus);
    if process_faints(state, bus) {
        // A faint ends the exchange: no attack from a fainted creature, and a
        // freshly sent-out replacement does not act this turn.
        return;
    }

    execute_attack(state, order[1], move_index_for(order[1]), rng, bus);
    process_faints(state, bus);
}

/// Attack ordering: move priority tier first, then effective speed; an exact
/// tie resolves in the player's favor. Ordering never consumes randomness.
fn determine_order(
    state: &BattleState,
    player_move_index: usize,
    enemy_move_index: usize,
) -> [SideId; 2] {
    let priority_of = |side: SideId, index: usize| {
        state
            .side(side)
            .active()
            .moves
            .get(index)
            .map(|inst| get_move_data(inst.move_).priority)
            .unwrap_or(0)
    };

    let player_priority = priority_of(SideId::Player, player_move_index);
    let enemy_priority = priority_of(SideId::Enemy, enemy_move_index);

    if player_priority != enemy_priority {
        return if player_priority > enemy_priority {
            [SideId::Player, SideId::Enemy]
        } else {
            [SideId::Enemy, SideId::Player]
        };
    }

    let player_side = state.side(SideId::Player);
    let enemy_side = state.side(SideId::Enemy);
    let player_speed = effective_speed(player_side.active(), &player_side.stages);
    let enemy_speed = effective_speed(enemy_side.active(), &enemy_side.stages);

    if player_speed >= enemy_speed {
        [SideId::Player, SideId::Enemy]
    } else {
        [SideId::Enemy, SideId::Player]
    }
}

/// Shared views of both sides, attacker first.
fn two_sides(state: &BattleState, attacker: SideId) -> (&BattleSide, &BattleSide) {
    let [player, enemy] = &state.sides;
    match attacker {
        SideId::Player => (player, enemy),
        SideId::Enemy => (enemy, player),
    }
}

fn execute_attack(
    state: &mut BattleState,
    attacker: SideId,
    move_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender = attacker.opponent();

    if state.side(attacker).active().is_fainted() {
        return;
    }

    if !check_can_act(state.side_mut(attacker).active_mut(), rng, bus) {
        return;
    }

    let move_ = {
        let attacker_creature = state.side_mut(attacker).active_mut();
        let Some(instance) = attacker_creature.moves.get_mut(move_index) else {
            return;
        };
        instance.use_move();
        instance.move_
    };

    bus.push(BattleEvent::MoveUsed {
        side: attacker,
        name: state.side(attacker).active().name().to_string(),
        move_used: move_,
    });

    // A move launched at an empty slot fizzles.
    if state.side(defender).active().is_fainted() {
        bus.push(BattleEvent::NoEffect {
            defender_name: state.side(defender).active().name().to_string(),
        });
        return;
    }

    if !move_hits(move_, rng) {
        bus.push(BattleEvent::MoveMissed {
            name: state.side(attacker).active().name().to_string(),
        });
        return;
    }

    let move_data = get_move_data(move_);
    if move_data.category == MoveCategory::Status {
        apply_move_effects(state, attacker, move_, rng, bus);
        return;
    }

    let outcome = {
        let (attacker_side, defender_side) = two_sides(state, attacker);
        calculate_damage(
            attacker_side.active(),
            &attacker_side.stages,
            defender_side.active(),
            &defender_side.stages,
            move_,
            rng,
        )
    };

    if outcome.effectiveness == 0.0 {
        bus.push(BattleEvent::NoEffect {
            defender_name: state.side(defender).active().name().to_string(),
        });
        return;
    }

    state.side_mut(defender).active_mut().take_damage(outcome.damage);

    if outcome.effectiveness != 1.0 {
        bus.push(BattleEvent::Effectiveness {
            multiplier: outcome.effectiveness,
        });
    }
    if outcome.critical {
        bus.push(BattleEvent::CriticalHit);
    }
    bus.push(BattleEvent::DamageDealt {
        side: defender,
        amount: outcome.damage,
        remaining_hp: state.side(defender).active().current_hp,
    });

    apply_move_effects(state, attacker, move_, rng, bus);
}

/// Apply a move's stat-stage and status effects. Self-directed effects land
/// even when the target fainted from the hit; target-directed effects
/// require a live target.
fn apply_move_effects(
    state: &mut BattleState,
    attacker: SideId,
    move_: Move,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender = attacker.opponent();
    let effects = get_move_data(move_).effects.clone();

    for effect in effects {
        match effect {
            MoveEffect::StatChange(target, stat, stages, chance) => {
                let target_side = match target {
                    Target::User => attacker,
                    Target::Target => defender,
                };
                if target == Target::Target && state.side(target_side).active().is_fainted() {
                    continue;
                }
                if chance < 100 && rng.next_outcome("stat change chance") > chance {
                    continue;
                }

                let side = state.side_mut(target_side);
                let name = side.active().name().to_string();
                let change = side.stages.apply_delta(stat, stages);
                bus.push(BattleEvent::StatStageChanged {
                    name,
                    stat,
                    delta: stages,
                    capped: change.capped,
                });
            }
            MoveEffect::Paralyze(chance) => {
                inflict(state, defender, StatusCondition::Paralyzed, chance, rng, bus)
            }
            MoveEffect::Poison(chance) => {
                inflict(state, defender, StatusCondition::Poisoned, chance, rng, bus)
            }
            MoveEffect::Burn(chance) => {
                inflict(state, defender, StatusCondition::Burned, chance, rng, bus)
            }
            MoveEffect::Freeze(chance) => {
                inflict(state, defender, StatusCondition::Frozen, chance, rng, bus)
            }
            MoveEffect::Sedate(chance) => {
                inflict(state, defender, StatusCondition::Asleep(0), chance, rng, bus)
            }
        }
    }
}

fn inflict(
    state: &mut BattleState,
    target: SideId,
    status: StatusCondition,
    chance: u8,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    try_apply_status(state.side_mut(target).active_mut(), status, chance, rng, bus);
}

/// Voluntary switch: recall the active creature (stages reset) and send out
/// the chosen replacement.
fn execute_switch(state: &mut BattleState, team_index: usize, bus: &mut EventBus) {
    let side = state.side_mut(SideId::Player);
    bus.push(BattleEvent::Recalled {
        name: side.active().name().to_string(),
    });
    side.switch_to(team_index);
    bus.push(BattleEvent::GoCreature {
        name: side.active().name().to_string(),
        hp: side.active().current_hp,
    });
}

/// Apply an item. Returns true when the battle ended (successful capture).
fn execute_item(state: &mut BattleState, item: Item, rng: &mut TurnRng, bus: &mut EventBus) -> bool {
    match item.data().kind {
        ItemKind::Cage { modifier } => execute_capture(state, item, modifier, rng, bus),
        ItemKind::Potion { heal } => {
            bus.push(BattleEvent::ItemUsed { item });
            let creature = state.side_mut(SideId::Player).active_mut();
            let restored = creature.heal(heal);
            bus.push(BattleEvent::Healed {
                side: SideId::Player,
                name: creature.name().to_string(),
                amount: restored,
                new_hp: creature.current_hp,
            });
            false
        }
        ItemKind::CureStatus(cure) => {
            bus.push(BattleEvent::ItemUsed { item });
            let creature = state.side_mut(SideId::Player).active_mut();
            if let Some(status) = creature.status {
                if cure_matches(cure, status) {
                    creature.status = None;
                    bus.push(BattleEvent::StatusCured {
                        name: creature.name().to_string(),
                        status,
                    });
                }
            }
            false
        }
    }
}

pub(crate) fn cure_matches(cure: StatusCure, status: StatusCondition) -> bool {
    matches!(
        (cure, status),
        (StatusCure::Poison, StatusCondition::Poisoned)
            | (StatusCure::Paralysis, StatusCondition::Paralyzed)
            | (StatusCure::Sleep, StatusCondition::Asleep(_))
            | (StatusCure::Burn, StatusCondition::Burned)
            | (StatusCure::Freeze, StatusCondition::Frozen)
    )
}

/// Throw a cage. A capture attempt is never free: on failure the opponent
/// still gets its action (handled by the caller).
fn execute_capture(
    state: &mut BattleState,
    item: Item,
    modifier: f32,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    // Wild battles only; the session filters this before resolution.
    if can_attempt_catch(state).is_err() {
        return false;
    }

    bus.push(BattleEvent::ItemUsed { item });

    let target = state.side(SideId::Enemy).active();
    let species = target.species;
    let probability = capture_probability(
        target.max_hp(),
        target.current_hp,
        get_species_data(species).catch_rate,
        modifier,
    );

    let attempt = attempt_capture(probability, modifier, rng);
    for nth in 1..=attempt.shakes {
        bus.push(BattleEvent::CageShake { nth });
    }

    if !attempt.success {
        bus.push(BattleEvent::BrokeFree);
        return false;
    }

    bus.push(BattleEvent::CaughtCreature { species });

    let caught = state.side(SideId::Enemy).active().clone();
    let player_side = state.side_mut(SideId::Player);
    if player_side.team.len() < PARTY_LIMIT {
        player_side.team.push(caught);
        bus.push(BattleEvent::JoinedParty { species });
    } else {
        bus.push(BattleEvent::PartyFull);
        bus.push(BattleEvent::SentToStorage { species });
        state.storage.push(caught);
    }

    state.outcome = Some(BattleOutcome::Caught(species));
    true
}

/// Attempt to run. Trainer battles never allow it; wild escapes succeed by
/// relative speed, with repeated attempts improving the odds.
fn execute_flee(state: &mut BattleState, rng: &mut TurnRng, bus: &mut EventBus) -> bool {
    if !state.kind.is_wild() {
        bus.push(BattleEvent::CannotEscape);
        return false;
    }

    state.side_mut(SideId::Player).flee_attempts += 1;
    let attempts = state.side(SideId::Player).flee_attempts as u32;

    let player_side = state.side(SideId::Player);
    let enemy_side = state.side(SideId::Enemy);
    let player_speed = effective_speed(player_side.active(), &player_side.stages) as u32;
    let enemy_speed = effective_speed(enemy_side.active(), &enemy_side.stages) as u32;

    let chance = if player_speed >= enemy_speed {
        100
    } else {
        let odds = player_speed * FLEE_SPEED_SCALE / enemy_speed.max(1) + FLEE_ATTEMPT_BONUS * attempts;
        (odds * 100 / FLEE_ODDS_DENOMINATOR).min(100)
    };

    if rng.next_outcome("flee roll") as u32 <= chance {
        bus.push(BattleEvent::FledSuccessfully);
        state.outcome = Some(BattleOutcome::Fled);
        true
    } else {
        bus.push(BattleEvent::FleeFailed);
        false
    }
}

/// The opponent's free action after a player switch, item, or failed flee.
fn enemy_free_action(
    state: &mut BattleState,
    enemy_action: TurnAction,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    if let TurnAction::Attack { move_index } = enemy_action {
        execute_attack(state, SideId::Enemy, move_index, rng, bus);
        process_faints(state, bus);
    }
}

/// End-of-turn status ticks in fixed order: player side, then enemy side
/// (poison and burn each tick at their own rate). Skipped while a
/// replacement is pending.
fn run_end_of_turn(state: &mut BattleState, bus: &mut EventBus) {
    if state.side(SideId::Player).active().is_fainted()
        || state.side(SideId::Enemy).active().is_fainted()
    {
        return;
    }

    apply_end_of_turn_damage(SideId::Player, state.side_mut(SideId::Player).active_mut(), bus);
    apply_end_of_turn_damage(SideId::Enemy, state.side_mut(SideId::Enemy).active_mut(), bus);

    process_faints(state, bus);
}

/// Handle any fresh faints: emit the faint lines, award experience, run
/// trainer replacements, and settle terminal outcomes. Defeat wins over
/// victory when both sides go down at once. Returns true if a faint was
/// processed.
fn process_faints(state: &mut BattleState, bus: &mut EventBus) -> bool {
    let mut any = false;

    if state.side(SideId::Enemy).active().is_fainted() {
        any = true;
        handle_enemy_faint(state, bus);
    }

    if state.side(SideId::Player).active().is_fainted() {
        any = true;
        let name = state.side(SideId::Player).active().name().to_string();
        bus.push(BattleEvent::Fainted {
            side: SideId::Player,
            name,
        });
        if !state.side(SideId::Player).has_reserves() {
            state.outcome = Some(BattleOutcome::Defeat);
        }
        // With reserves left the session enters the forced-switch phase.
    }

    any
}

fn handle_enemy_faint(state: &mut BattleState, bus: &mut EventBus) {
    let defeated = state.side(SideId::Enemy).active().clone();
    bus.push(BattleEvent::Fainted {
        side: SideId::Enemy,
        name: defeated.name().to_string(),
    });

    let gain = exp_gain_for_defeating(&defeated);
    award_experience(state.side_mut(SideId::Player).active_mut(), gain, bus);

    if let Some(new_species) = check_evolution(state.side(SideId::Player).active()) {
        evolve(state.side_mut(SideId::Player).active_mut(), new_species, bus);
    }

    match state.kind.clone() {
        BattleKind::Trainer { trainer_name, prize_money } => {
            if let Some(next) = state.side(SideId::Enemy).next_healthy_reserve() {
                let enemy_side = state.side_mut(SideId::Enemy);
                enemy_side.switch_to(next);
                bus.push(BattleEvent::TrainerSentOut {
                    trainer_name,
                    name: enemy_side.active().name().to_string(),
                    hp: enemy_side.active().current_hp,
                });
            } else {
                state.outcome = Some(BattleOutcome::Victory);
                bus.push(BattleEvent::TrainerDefeated {
                    trainer_name: trainer_name.clone(),
                });
                bus.push(BattleEvent::PrizeMoney { amount: prize_money });
            }
        }
        BattleKind::Wild => {
            state.outcome = Some(BattleOutcome::Victory);
        }
    }
}

#[cfg(test)]
mod turn_order_tests {
    use super::*;
    use crate::battle::state::BattleSide;
    use crate::creature::CreatureInst;
    use schema::Species;

    fn state_with_speeds(player_speed: u16, enemy_speed: u16) -> BattleState {
        let mut player = CreatureInst::new(Species::Whitenose, 10);
        player.stats.speed = player_speed;
        let mut enemy = CreatureInst::new(Species::Nurse, 10);
        enemy.stats.speed = enemy_speed;

        BattleState::new(
            BattleKind::Wild,
            BattleSide::new("Player".to_string(), vec![player]).unwrap(),
            BattleSide::new("Wild".to_string(), vec![enemy]).unwrap(),
        )
    }

    #[test]
    fn faster_side_acts_first() {
        let state = state_with_speeds(100, 90);
        assert_eq!(determine_order(&state, 0, 0), [SideId::Player, SideId::Enemy]);

        let state = state_with_speeds(90, 100);
        assert_eq!(determine_order(&state, 0, 0), [SideId::Enemy, SideId::Player]);
    }

    #[test]
    fn exact_speed_tie_goes_to_player() {
        let state = state_with_speeds(75, 75);
        // Deterministic: no RNG is consulted for ordering.
        for _ in 0..10 {
            assert_eq!(determine_order(&state, 0, 0), [SideId::Player, SideId::Enemy]);
        }
    }

    #[test]
    fn speed_stages_shift_the_order() {
        let mut state = state_with_speeds(80, 100);
        assert_eq!(determine_order(&state, 0, 0), [SideId::Enemy, SideId::Player]);

        // +2 speed on the player: 80 * 2 = 160 beats 100.
        state.sides[0].stages.apply_delta(schema::StatType::Speed, 2);
        assert_eq!(determine_order(&state, 0, 0), [SideId::Player, SideId::Enemy]);
    }

    #[test]
    fn priority_overrides_speed() {
        // Nurse Shark at level 12 knows Aqua Jet (priority +1) in slot 3.
        let mut player = CreatureInst::new(Species::Nurse, 12);
        player.stats.speed = 10;
        let mut enemy = CreatureInst::new(Species::Whitenose, 10);
        enemy.stats.speed = 200;

        let state = BattleState::new(
            BattleKind::Wild,
            BattleSide::new("Player".to_string(), vec![player]).unwrap(),
            BattleSide::new("Wild".to_string(), vec![enemy]).unwrap(),
        );

        let aqua_jet_index = state.sides[0]
            .active()
            .known_moves()
            .position(|m| m == Move::AquaJet)
            .unwrap();

        assert_eq!(
            determine_order(&state, aqua_jet_index, 0),
            [SideId::Player, SideId::Enemy]
        );
    }
}
