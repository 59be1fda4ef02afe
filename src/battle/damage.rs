use crate::battle::state::TurnRng;
use crate::battle::stats::{effective_attack, effective_defense, get_type_effectiveness};
use crate::creature::CreatureInst;
use crate::move_data::get_move_data;
use crate::species_data::get_species_data;
use crate::stat_stages::StatStages;
use schema::{Move, MoveCategory};

/// Critical hit chance as a percentile threshold (~1/16).
pub const CRITICAL_HIT_CHANCE_PERCENT: u8 = 6;

/// Critical hits double the final damage.
pub const CRITICAL_DAMAGE_MULTIPLIER: f64 = 2.0;

/// Same-type attack bonus.
pub const STAB_MULTIPLIER: f64 = 1.5;

/// Damage variance bounds: every hit lands at 85-100% of computed damage.
pub const DAMAGE_VARIANCE_MIN_PERCENT: u32 = 85;
pub const DAMAGE_VARIANCE_MAX_PERCENT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub effectiveness: f64,
    pub critical: bool,
    pub stab: bool,
}

impl DamageOutcome {
    fn none() -> Self {
        DamageOutcome {
            damage: 0,
            effectiveness: 1.0,
            critical: false,
            stab: false,
        }
    }
}

/// Compute the damage of a move that has already passed its accuracy check.
///
/// Draw order (pinned for test scripting): critical roll, then variance roll.
/// Status moves, zero-power moves, and immune targets consume no randomness.
pub fn calculate_damage(
    attacker: &CreatureInst,
    attacker_stages: &StatStages,
    defender: &CreatureInst,
    defender_stages: &StatStages,
    move_: Move,
    rng: &mut TurnRng,
) -> DamageOutcome {
    let move_data = get_move_data(move_);

    if move_data.category == MoveCategory::Status || move_data.power == 0 {
        return DamageOutcome::none();
    }

    let defender_types = &get_species_data(defender.species).types;
    let effectiveness = get_type_effectiveness(move_data.move_type, defender_types);
    if effectiveness == 0.0 {
        return DamageOutcome {
            effectiveness,
            ..DamageOutcome::none()
        };
    }

    let critical = rng.next_outcome("critical hit roll") <= CRITICAL_HIT_CHANCE_PERCENT;

    let attack = effective_attack(attacker, attacker_stages, move_) as u32;
    let defense = effective_defense(defender, defender_stages, move_, critical) as u32;

    let level = attacker.level as u32;
    let power = move_data.power as u32;
    let base_damage = ((2 * level / 5 + 2) * power * attack / defense) / 50 + 2;

    let stab = get_species_data(attacker.species)
        .types
        .contains(&move_data.move_type);

    let variance_roll = rng.next_outcome("damage variance") as u32;
    let variance_percent = DAMAGE_VARIANCE_MIN_PERCENT
        + ((variance_roll - 1) * (DAMAGE_VARIANCE_MAX_PERCENT - DAMAGE_VARIANCE_MIN_PERCENT)) / 99;

    let critical_multiplier = if critical { CRITICAL_DAMAGE_MULTIPLIER } else { 1.0 };
    let stab_multiplier = if stab { STAB_MULTIPLIER } else { 1.0 };

    let mut damage = (base_damage as f64
        * critical_multiplier
        * stab_multiplier
        * effectiveness
        * (variance_percent as f64 / 100.0))
        .floor() as u16;

    // A hit always does at least 1 damage unless the target is immune.
    if damage == 0 {
        damage = 1;
    }

    DamageOutcome {
        damage,
        effectiveness,
        critical,
        stab,
    }
}
