// In: src/lib.rs

//! Reef Adventure Battle Engine
//!
//! The turn-based battle core of a shark-collecting exploration game:
//! deterministic turn resolution over an injected randomness oracle, an
//! ordered battle-event log that formats into player-visible messages, and
//! a session controller that the presentation layer drives one input at a
//! time. Rendering, input polling, maps, and persistence live elsewhere.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod creature;
pub mod errors;
pub mod move_data;
pub mod progression;
pub mod species_data;
pub mod stat_stages;

// --- PUBLIC API RE-EXPORTS ---
// The public-facing API of the `reef-adventure` crate, so users can import
// the important types directly.

// --- From the `schema` crate ---
// Static data definitions and enums.
pub use schema::{
    BaseStats,
    ElementType,
    EvolutionData,
    Item,
    ItemKind,
    Learnset,
    Move,
    MoveCategory,
    MoveData,
    MoveEffect,
    Species,
    SpeciesData,
    StatType,
    StatusCure,
    Target,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::session::{BattleSession, BattleSummary, PlayerInput, TrainerData};
pub use battle::state::{
    BattleEvent, BattleKind, BattleOutcome, BattlePhase, BattleSide, BattleState, EventBus,
    SideId, TurnRng,
};
pub use battle::turn::{resolve_turn, TurnAction};

// Core runtime types for a battle.
pub use battle::ai::{Behavior, RandomAI, ScoringAI};
pub use creature::{CreatureInst, MoveInstance, StatusCondition};
pub use stat_stages::{stage_multiplier, StatStages};

// Primary data access functions.
pub use move_data::get_move_data;
pub use species_data::get_species_data;

// Crate-specific error and result types.
pub use errors::{ActionError, BattleEngineError, BattleResult, BattleStateError};
