use std::fmt;

/// Top-level error type for the battle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEngineError {
    /// A player action was rejected by validation.
    Action(ActionError),
    /// The battle state cannot support the requested operation.
    BattleState(BattleStateError),
}

/// Rejected player actions. These are policy rejections, not failures: the
/// session treats them as no-ops and the menu stays open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Move index out of bounds for the active creature.
    InvalidMoveIndex(usize),
    /// The selected move has no PP remaining.
    NoPpRemaining,
    /// Switch target index out of bounds or slot empty.
    InvalidSwitchTarget(usize),
    /// Switch target has fainted.
    SwitchTargetFainted(usize),
    /// Switch target is already the active creature.
    SwitchTargetActive(usize),
    /// Capture items cannot be used against trainer-owned creatures.
    CaptureNotAllowed,
    /// The item would do nothing (full HP, or no matching status).
    ItemWouldHaveNoEffect,
    /// The action is not valid in the current battle phase.
    WrongPhase,
}

/// Inconsistent battle-state construction or access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    /// A battle needs at least one healthy creature per side.
    EmptyParty,
    /// No active creature found where one was required.
    NoActiveCreature,
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::Action(err) => write!(f, "Action error: {}", err),
            BattleEngineError::BattleState(err) => write!(f, "Battle state error: {}", err),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            ActionError::NoPpRemaining => write!(f, "Move has no PP remaining"),
            ActionError::InvalidSwitchTarget(index) => {
                write!(f, "Invalid switch target: {}", index)
            }
            ActionError::SwitchTargetFainted(index) => {
                write!(f, "Cannot switch to fainted creature at slot {}", index)
            }
            ActionError::SwitchTargetActive(index) => {
                write!(f, "Creature at slot {} is already active", index)
            }
            ActionError::CaptureNotAllowed => {
                write!(f, "Capture attempts are only allowed against wild creatures")
            }
            ActionError::ItemWouldHaveNoEffect => {
                write!(f, "The item would have no effect")
            }
            ActionError::WrongPhase => write!(f, "Action not valid in the current phase"),
        }
    }
}

impl fmt::Display for BattleStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStateError::EmptyParty => {
                write!(f, "A battle requires at least one healthy creature per side")
            }
            BattleStateError::NoActiveCreature => write!(f, "No active creature found"),
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for ActionError {}
impl std::error::Error for BattleStateError {}

impl From<ActionError> for BattleEngineError {
    fn from(err: ActionError) -> Self {
        BattleEngineError::Action(err)
    }
}

impl From<BattleStateError> for BattleEngineError {
    fn from(err: BattleStateError) -> Self {
        BattleEngineError::BattleState(err)
    }
}

/// Type alias for Results using BattleEngineError.
pub type BattleResult<T> = Result<T, BattleEngineError>;
