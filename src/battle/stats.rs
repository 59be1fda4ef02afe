use crate::battle::state::TurnRng;
use crate::creature::{CreatureInst, StatusCondition};
use crate::move_data::get_move_data;
use crate::stat_stages::{effective_stat, StatStages};
use schema::{ElementType, Move, MoveCategory, StatType};

/// Burn halves the power of physical attacks.
pub const BURN_ATTACK_MULTIPLIER: f64 = 0.5;

/// Paralysis halves effective speed.
pub const PARALYSIS_SPEED_MULTIPLIER: f64 = 0.5;

/// Effective offensive stat for a move: the staged attack or special attack,
/// with the burn penalty on physical attacks. Status moves have no
/// offensive stat.
pub fn effective_attack(creature: &CreatureInst, stages: &StatStages, move_: Move) -> u16 {
    let move_data = get_move_data(move_);

    let (base, stat) = match move_data.category {
        MoveCategory::Physical => (creature.stats.attack, StatType::Attack),
        MoveCategory::Special => (creature.stats.sp_attack, StatType::SpAttack),
        MoveCategory::Status => return 0,
    };

    let mut attack = effective_stat(base, stages.get(stat));

    if move_data.category == MoveCategory::Physical
        && creature.status == Some(StatusCondition::Burned)
    {
        attack = (attack as f64 * BURN_ATTACK_MULTIPLIER) as u16;
    }

    attack.max(1)
}

/// Effective defensive stat against a move. A critical hit ignores the
/// defender's positive stage boosts; earned drops still count.
pub fn effective_defense(
    creature: &CreatureInst,
    stages: &StatStages,
    move_: Move,
    critical: bool,
) -> u16 {
    let move_data = get_move_data(move_);

    let (base, stat) = match move_data.category {
        MoveCategory::Physical => (creature.stats.defense, StatType::Defense),
        MoveCategory::Special => (creature.stats.sp_defense, StatType::SpDefense),
        MoveCategory::Status => return 0,
    };

    let mut stage = stages.get(stat);
    if critical {
        stage = stage.min(0);
    }

    effective_stat(base, stage).max(1)
}

/// Effective speed: staged speed, halved by paralysis.
pub fn effective_speed(creature: &CreatureInst, stages: &StatStages) -> u16 {
    let mut speed = effective_stat(creature.stats.speed, stages.get(StatType::Speed));

    if creature.status == Some(StatusCondition::Paralyzed) {
        speed = (speed as f64 * PARALYSIS_SPEED_MULTIPLIER) as u16;
    }

    speed
}

/// Roll the accuracy check for a move. Moves without an accuracy value never
/// miss and consume no randomness.
pub fn move_hits(move_: Move, rng: &mut TurnRng) -> bool {
    let Some(accuracy) = get_move_data(move_).accuracy else {
        return true;
    };
    rng.next_outcome("accuracy check") <= accuracy
}

/// Combined type effectiveness of an attack against a (possibly dual-typed)
/// defender. The product is clamped onto the four game-visible values:
/// a double resistance reads as 0.5, a double weakness as 2.
pub fn get_type_effectiveness(attack_type: ElementType, defender_types: &[ElementType]) -> f64 {
    let product: f64 = defender_types
        .iter()
        .map(|&d| ElementType::type_effectiveness(attack_type, d))
        .product();

    if product == 0.0 {
        0.0
    } else if product < 1.0 {
        0.5
    } else if product > 1.0 {
        2.0
    } else {
        1.0
    }
}
