//! In-battle stat stage modifiers (-6 to +6).
//!
//! Stages are scoped to a single combatant's active tenure: created at zero
//! on battle start or switch-in, reset on switch-out and battle end. They
//! never persist on the creature itself.

use schema::StatType;
use serde::{Deserialize, Serialize};

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Stage record for one active combatant. HP cannot be staged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    pub attack: i8,
    pub defense: i8,
    pub sp_attack: i8,
    pub sp_defense: i8,
    pub speed: i8,
}

/// Outcome of a stage delta: what actually changed and whether the clamp bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub new_stage: i8,
    pub actual_delta: i8,
    pub capped: bool,
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: StatType) -> i8 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpAttack => self.sp_attack,
            StatType::SpDefense => self.sp_defense,
            StatType::Speed => self.speed,
        }
    }

    fn get_mut(&mut self, stat: StatType) -> &mut i8 {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::SpAttack => &mut self.sp_attack,
            StatType::SpDefense => &mut self.sp_defense,
            StatType::Speed => &mut self.speed,
        }
    }

    /// Apply a stage delta, clamping to [-6, +6]. Always succeeds; the result
    /// reports the applied delta and whether the clamp reduced it, so the
    /// caller can emit the "won't go any higher/lower" line.
    pub fn apply_delta(&mut self, stat: StatType, delta: i8) -> StageChange {
        let slot = self.get_mut(stat);
        let old_stage = *slot;
        let new_stage = (old_stage + delta).clamp(MIN_STAGE, MAX_STAGE);
        *slot = new_stage;

        let actual_delta = new_stage - old_stage;
        StageChange {
            new_stage,
            actual_delta,
            capped: actual_delta != delta,
        }
    }

    /// Reset all five stages to 0 (switch-out or battle end).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Multiplier for a stat stage.
/// Stage -6: 2/8 ... -1: 2/3, 0: 1, +1: 3/2 ... +6: 8/2.
/// Out-of-range input is clamped before lookup.
pub fn stage_multiplier(stage: i8) -> f64 {
    match stage.clamp(MIN_STAGE, MAX_STAGE) {
        -6 => 2.0 / 8.0,
        -5 => 2.0 / 7.0,
        -4 => 2.0 / 6.0,
        -3 => 2.0 / 5.0,
        -2 => 2.0 / 4.0,
        -1 => 2.0 / 3.0,
        0 => 1.0,
        1 => 3.0 / 2.0,
        2 => 4.0 / 2.0,
        3 => 5.0 / 2.0,
        4 => 6.0 / 2.0,
        5 => 7.0 / 2.0,
        _ => 8.0 / 2.0,
    }
}

/// Effective stat value after applying the stage modifier.
pub fn effective_stat(base_stat: u16, stage: i8) -> u16 {
    (base_stat as f64 * stage_multiplier(stage)).floor() as u16
}

/// Display name for a stat as printed in battle messages.
pub fn stat_display_name(stat: StatType) -> &'static str {
    match stat {
        StatType::Attack => "Attack",
        StatType::Defense => "Defense",
        StatType::SpAttack => "Sp. Atk",
        StatType::SpDefense => "Sp. Def",
        StatType::Speed => "Speed",
    }
}

/// Message line for a stat change. The wording escalates with the magnitude
/// of the requested delta and has a distinct form when the clamp blocked it.
pub fn stat_change_message(creature_name: &str, stat: StatType, delta: i8, capped: bool) -> String {
    let stat_name = stat_display_name(stat);

    if capped {
        return if delta > 0 {
            format!("{}'s {} won't go any higher!", creature_name, stat_name)
        } else {
            format!("{}'s {} won't go any lower!", creature_name, stat_name)
        };
    }

    let verb = match (delta > 0, delta.abs()) {
        (true, 1) => "rose!",
        (true, 2) => "rose sharply!",
        (true, _) => "rose drastically!",
        (false, 1) => "fell!",
        (false, 2) => "harshly fell!",
        (false, _) => "severely fell!",
    };
    format!("{}'s {} {}", creature_name, stat_name, verb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(-6, 0.25)]
    #[case(-3, 0.4)]
    #[case(-1, 2.0 / 3.0)]
    #[case(0, 1.0)]
    #[case(1, 1.5)]
    #[case(2, 2.0)]
    #[case(6, 4.0)]
    fn multiplier_table(#[case] stage: i8, #[case] expected: f64) {
        assert!((stage_multiplier(stage) - expected).abs() < 1e-9);
    }

    #[test]
    fn multiplier_clamps_out_of_range_input() {
        assert_eq!(stage_multiplier(9), stage_multiplier(6));
        assert_eq!(stage_multiplier(-9), stage_multiplier(-6));
    }

    #[test]
    fn effective_stat_floors() {
        assert_eq!(effective_stat(100, 0), 100);
        assert_eq!(effective_stat(100, 1), 150);
        assert_eq!(effective_stat(100, -1), 66); // 100 * 2/3 floored
        assert_eq!(effective_stat(100, 6), 400);
        assert_eq!(effective_stat(100, -6), 25);
    }

    #[test]
    fn delta_clamps_at_plus_six() {
        let mut stages = StatStages::new();

        let first = stages.apply_delta(StatType::Attack, 2);
        assert_eq!(first.new_stage, 2);
        assert!(!first.capped);

        let second = stages.apply_delta(StatType::Attack, 2);
        assert_eq!(second.new_stage, 4);
        assert!(!second.capped);

        let third = stages.apply_delta(StatType::Attack, 2);
        assert_eq!(third.new_stage, 6);
        assert!(!third.capped);

        let fourth = stages.apply_delta(StatType::Attack, 2);
        assert_eq!(fourth.new_stage, 6);
        assert_eq!(fourth.actual_delta, 0);
        assert!(fourth.capped);
    }

    #[test]
    fn delta_partially_applied_still_reports_capped() {
        let mut stages = StatStages::new();
        stages.apply_delta(StatType::Speed, 5);

        let change = stages.apply_delta(StatType::Speed, 2);
        assert_eq!(change.new_stage, 6);
        assert_eq!(change.actual_delta, 1);
        assert!(change.capped);
    }

    #[test]
    fn stage_stays_in_range_for_any_delta_sequence() {
        let mut stages = StatStages::new();
        for delta in [-3, 8, -12, 2, 2, 2, 2, -1, 7, -7] {
            let change = stages.apply_delta(StatType::Defense, delta);
            assert!((MIN_STAGE..=MAX_STAGE).contains(&change.new_stage));
            assert_eq!(change.capped, change.actual_delta != delta);
        }
    }

    #[test]
    fn reset_zeroes_every_stat() {
        let mut stages = StatStages::new();
        stages.apply_delta(StatType::Attack, 3);
        stages.apply_delta(StatType::Speed, -2);
        stages.reset();
        assert_eq!(stages, StatStages::new());
    }

    #[test]
    fn message_wording_escalates() {
        assert_eq!(
            stat_change_message("Bonnethead", StatType::Attack, 1, false),
            "Bonnethead's Attack rose!"
        );
        assert_eq!(
            stat_change_message("Bonnethead", StatType::Attack, 2, false),
            "Bonnethead's Attack rose sharply!"
        );
        assert_eq!(
            stat_change_message("Bonnethead", StatType::Attack, 3, false),
            "Bonnethead's Attack rose drastically!"
        );
        assert_eq!(
            stat_change_message("Bonnethead", StatType::Defense, -1, false),
            "Bonnethead's Defense fell!"
        );
        assert_eq!(
            stat_change_message("Bonnethead", StatType::Defense, -2, false),
            "Bonnethead's Defense harshly fell!"
        );
        assert_eq!(
            stat_change_message("Bonnethead", StatType::Defense, -3, false),
            "Bonnethead's Defense severely fell!"
        );
        assert_eq!(
            stat_change_message("Bonnethead", StatType::SpAttack, 1, true),
            "Bonnethead's Sp. Atk won't go any higher!"
        );
        assert_eq!(
            stat_change_message("Bonnethead", StatType::Speed, -1, true),
            "Bonnethead's Speed won't go any lower!"
        );
    }
}
