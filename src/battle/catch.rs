//! Capture mechanics: validation, probability, and the cage-shake roll.

use crate::battle::state::{BattleKind, BattleState, SideId, TurnRng};
use serde::{Deserialize, Serialize};

/// Species catch rates and the probability model top out at this value.
pub const CATCH_RATE_CEILING: f32 = 255.0;

/// A capture lands only after four consecutive successful shake draws.
pub const SHAKES_FOR_CAPTURE: u8 = 4;

/// The player's party holds at most six creatures; overflow goes to storage.
pub const PARTY_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchError {
    /// Trainer-owned creatures can never be caught.
    TrainerBattle,
    /// The target has already fainted.
    TargetFainted,
}

/// Hard preconditions for a capture attempt. A full party is not an error;
/// the caught creature is routed to storage instead.
pub fn can_attempt_catch(state: &BattleState) -> Result<(), CatchError> {
    if !matches!(state.kind, BattleKind::Wild) {
        return Err(CatchError::TrainerBattle);
    }
    if state.side(SideId::Enemy).active().is_fainted() {
        return Err(CatchError::TargetFainted);
    }
    Ok(())
}

/// Capture probability in [0, 1]. Rises as the target's HP falls, scaled by
/// the species' catch-rate constant and the cage's modifier.
pub fn capture_probability(
    max_hp: u16,
    current_hp: u16,
    species_catch_rate: u8,
    cage_modifier: f32,
) -> f32 {
    let max_hp = max_hp as f32;
    let current_hp = current_hp as f32;

    let hp_factor = (3.0 * max_hp - 2.0 * current_hp) / (3.0 * max_hp);
    let rate = hp_factor * species_catch_rate as f32 * cage_modifier;

    (rate / CATCH_RATE_CEILING).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureAttempt {
    pub success: bool,
    /// Cage rattles shown to the player, 0-3.
    pub shakes: u8,
}

/// Roll a capture: four independent shake draws against the probability.
/// The shake count is the run of successes before the first failure, capped
/// at three for display; success requires all four. A cage modifier at the
/// ceiling (Master Cage) skips the draws entirely.
pub fn attempt_capture(
    probability: f32,
    cage_modifier: f32,
    rng: &mut TurnRng,
) -> CaptureAttempt {
    if cage_modifier >= CATCH_RATE_CEILING {
        return CaptureAttempt {
            success: true,
            shakes: 3,
        };
    }

    let threshold = (probability * 100.0) as u8;
    let mut shakes = 0;
    for _ in 0..SHAKES_FOR_CAPTURE {
        if rng.next_outcome("cage shake") <= threshold {
            shakes += 1;
        } else {
            break;
        }
    }

    CaptureAttempt {
        success: shakes >= SHAKES_FOR_CAPTURE,
        shakes: shakes.min(3),
    }
}
