//! Status condition behavior: action prevention, end-of-turn damage, and
//! application with type immunities.

use crate::battle::state::{BattleEvent, EventBus, SideId, TurnRng};
use crate::creature::{CreatureInst, StatusCondition};
use crate::species_data::get_species_data;
use schema::ElementType;

/// Chance a paralyzed creature loses its action.
pub const PARALYSIS_SKIP_PERCENT: u8 = 25;

/// Chance a frozen creature thaws on each action attempt.
pub const FREEZE_THAW_PERCENT: u8 = 20;

/// Sleep lasts 1-3 turns, drawn at infliction.
pub const SLEEP_TURNS_MAX: u8 = 3;

/// Poison ticks for 1/8 max HP at end of turn.
pub const POISON_DAMAGE_DIVISOR: u16 = 8;

/// Burn ticks for 1/16 max HP at end of turn.
pub const BURN_DAMAGE_DIVISOR: u16 = 16;

/// Check whether a creature can act this turn, resolving sleep counters,
/// thaw rolls, and paralysis rolls. Emits the cure or the can't-move line.
pub fn check_can_act(
    creature: &mut CreatureInst,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    let name = creature.name().to_string();

    match creature.status {
        None => true,
        Some(StatusCondition::Asleep(turns)) => {
            if turns == 0 {
                creature.status = None;
                bus.push(BattleEvent::StatusCured {
                    name,
                    status: StatusCondition::Asleep(0),
                });
                true
            } else {
                creature.status = Some(StatusCondition::Asleep(turns - 1));
                bus.push(BattleEvent::CannotAct {
                    name,
                    status: StatusCondition::Asleep(turns),
                });
                false
            }
        }
        Some(StatusCondition::Frozen) => {
            if rng.next_outcome("thaw roll") <= FREEZE_THAW_PERCENT {
                creature.status = None;
                bus.push(BattleEvent::StatusCured {
                    name,
                    status: StatusCondition::Frozen,
                });
                true
            } else {
                bus.push(BattleEvent::CannotAct {
                    name,
                    status: StatusCondition::Frozen,
                });
                false
            }
        }
        Some(StatusCondition::Paralyzed) => {
            if rng.next_outcome("full paralysis roll") <= PARALYSIS_SKIP_PERCENT {
                bus.push(BattleEvent::CannotAct {
                    name,
                    status: StatusCondition::Paralyzed,
                });
                false
            } else {
                true
            }
        }
        // Poison and burn never prevent acting.
        Some(_) => true,
    }
}

/// Apply this side's end-of-turn status damage, if any. Returns true if the
/// tick caused a faint; the faint event itself is the caller's to emit.
pub fn apply_end_of_turn_damage(
    side: SideId,
    creature: &mut CreatureInst,
    bus: &mut EventBus,
) -> bool {
    let (status, divisor) = match creature.status {
        Some(status @ StatusCondition::Poisoned) => (status, POISON_DAMAGE_DIVISOR),
        Some(status @ StatusCondition::Burned) => (status, BURN_DAMAGE_DIVISOR),
        _ => return false,
    };

    let damage = (creature.max_hp() / divisor).max(1);
    creature.take_damage(damage);

    bus.push(BattleEvent::StatusDamage {
        side,
        name: creature.name().to_string(),
        status,
        damage,
        remaining_hp: creature.current_hp,
    });

    creature.is_fainted()
}

/// Element-based status immunities.
fn is_immune(types: &[ElementType], status: StatusCondition) -> bool {
    match status {
        StatusCondition::Burned => types.contains(&ElementType::Fire),
        StatusCondition::Frozen => types.contains(&ElementType::Ice),
        StatusCondition::Paralyzed => types.contains(&ElementType::Electric),
        StatusCondition::Poisoned => types.contains(&ElementType::Poison),
        StatusCondition::Asleep(_) => false,
    }
}

/// Try to inflict a status condition. A creature that already carries a
/// status is silently unaffected; a type immunity is announced only for
/// primary (100%) effects so secondary rolls stay quiet. Sleep draws its
/// turn counter here.
pub fn try_apply_status(
    creature: &mut CreatureInst,
    status: StatusCondition,
    chance: u8,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    if creature.status.is_some() || creature.is_fainted() {
        return false;
    }

    let types = &get_species_data(creature.species).types;
    if is_immune(types, status) {
        if chance >= 100 {
            bus.push(BattleEvent::StatusBlocked {
                name: creature.name().to_string(),
                status,
            });
        }
        return false;
    }

    if chance < 100 && rng.next_outcome("status effect chance") > chance {
        return false;
    }

    let applied = match status {
        StatusCondition::Asleep(_) => {
            let turns = 1 + (rng.next_outcome("sleep duration") - 1) % SLEEP_TURNS_MAX;
            StatusCondition::Asleep(turns)
        }
        other => other,
    };

    creature.status = Some(applied);
    bus.push(BattleEvent::StatusApplied {
        name: creature.name().to_string(),
        status: applied,
    });
    true
}
