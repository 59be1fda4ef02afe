//! Opponent action selection, behind a swappable policy trait.

use crate::battle::state::{BattleState, SideId};
use crate::battle::stats::{effective_attack, get_type_effectiveness};
use crate::battle::turn::TurnAction;
use crate::move_data::get_move_data;
use crate::species_data::get_species_data;
use ordered_float::OrderedFloat;
use schema::{Move, MoveCategory, MoveEffect, Target};

/// A system that decides a side's next action. Wild encounters and trainers
/// plug in different policies; tests can script one.
pub trait Behavior {
    fn choose_action(&self, state: &BattleState, side: SideId) -> TurnAction;
}

/// Move slots with PP remaining. Falls back to slot 0 when everything is
/// empty so the side still acts.
fn usable_moves(state: &BattleState, side: SideId) -> Vec<usize> {
    let usable: Vec<usize> = state
        .side(side)
        .active()
        .moves
        .iter()
        .enumerate()
        .filter(|(_, inst)| inst.pp > 0)
        .map(|(i, _)| i)
        .collect();

    if usable.is_empty() {
        vec![0]
    } else {
        usable
    }
}

/// Wild creatures attack with a uniformly random usable move.
pub struct RandomAI;

impl Behavior for RandomAI {
    fn choose_action(&self, state: &BattleState, side: SideId) -> TurnAction {
        use rand::Rng;
        let usable = usable_moves(state, side);
        let pick = rand::rng().random_range(0..usable.len());
        TurnAction::Attack {
            move_index: usable[pick],
        }
    }
}

/// Trainers pick the highest-scoring move: expected damage against the
/// current defender, with utility scoring for status moves.
pub struct ScoringAI;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    fn score_move(&self, state: &BattleState, side: SideId, move_: Move) -> f32 {
        let opponent = side.opponent();
        let attacker_side = state.side(side);
        let defender_side = state.side(opponent);
        let attacker = attacker_side.active();
        let defender = defender_side.active();
        let move_data = get_move_data(move_);

        let mut score = 0.0;

        if matches!(
            move_data.category,
            MoveCategory::Physical | MoveCategory::Special
        ) {
            let defender_types = &get_species_data(defender.species).types;
            let effectiveness =
                get_type_effectiveness(move_data.move_type, defender_types) as f32;

            // An immune target makes the move worthless.
            if effectiveness == 0.0 {
                return -1000.0;
            }

            let attacker_types = &get_species_data(attacker.species).types;
            let stab = if attacker_types.contains(&move_data.move_type) {
                1.5
            } else {
                1.0
            };

            // Normalize the offensive stat so power comparisons stay stable
            // across levels.
            let effective_stat =
                effective_attack(attacker, &attacker_side.stages, move_) as f32;
            let normalized_power = effective_stat / (attacker.level as f32 * 2.0).max(1.0);

            score = move_data.power as f32 * effectiveness * stab * normalized_power;

            let accuracy = move_data.accuracy.unwrap_or(101);
            score *= accuracy as f32 / 100.0;
        }

        if move_data.category == MoveCategory::Status {
            score = self.score_status_move(state, side, move_);
        }

        score
    }

    fn score_status_move(&self, state: &BattleState, side: SideId, move_: Move) -> f32 {
        let opponent = side.opponent();
        let attacker_side = state.side(side);
        let defender = state.side(opponent).active();
        let attacker = attacker_side.active();
        let move_data = get_move_data(move_);

        let mut score = 30.0;

        for effect in &move_data.effects {
            match effect {
                MoveEffect::StatChange(Target::User, stat, stages, _) if *stages > 0 => {
                    // Boosting is only worth it while healthy and not maxed.
                    let hp_ratio = attacker.current_hp as f32 / attacker.max_hp() as f32;
                    let current_stage = attacker_side.stages.get(*stat);
                    if current_stage >= 6 {
                        score -= 100.0;
                    } else if hp_ratio > 0.5 {
                        score += 40.0;
                    } else {
                        score -= 20.0;
                    }
                }
                MoveEffect::StatChange(Target::Target, _, stages, _) if *stages < 0 => {
                    score += 35.0;
                }
                MoveEffect::Paralyze(_)
                | MoveEffect::Poison(_)
                | MoveEffect::Burn(_)
                | MoveEffect::Freeze(_)
                | MoveEffect::Sedate(_) => {
                    if defender.status.is_some() {
                        // A second status can never land.
                        score = -100.0;
                    } else {
                        score += 50.0;
                        if matches!(effect, MoveEffect::Paralyze(_))
                            && defender.stats.speed > attacker.stats.speed
                        {
                            score += 20.0;
                        }
                    }
                }
                _ => {}
            }
        }

        score
    }
}

impl Behavior for ScoringAI {
    fn choose_action(&self, state: &BattleState, side: SideId) -> TurnAction {
        use rand::Rng;
        let mut rng = rand::rng();

        let best = usable_moves(state, side)
            .into_iter()
            .map(|index| {
                let move_ = state.side(side).active().moves[index].move_;
                let mut score = self.score_move(state, side, move_);
                // A little jitter breaks ties and repetitive loops.
                score *= 1.0 + (rng.random::<f32>() * 0.1 - 0.05);
                (index, score)
            })
            .max_by_key(|(_, score)| OrderedFloat(*score))
            .map(|(index, _)| index)
            .unwrap_or(0);

        TurnAction::Attack { move_index: best }
    }
}
