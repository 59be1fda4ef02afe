use crate::creature::{CreatureInst, StatusCondition};
use crate::errors::BattleStateError;
use crate::stat_stages::{stat_change_message, StatStages};
use schema::{Item, Move, Species, StatType};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Displayed HP drains at this rate; the presentation layer supplies elapsed
/// time, the engine never owns a clock.
pub const HP_DRAIN_PER_SEC: f32 = 50.0;

/// The two combatant slots. The player side is always index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideId {
    Player,
    Enemy,
}

impl SideId {
    pub fn index(self) -> usize {
        match self {
            SideId::Player => 0,
            SideId::Enemy => 1,
        }
    }

    pub fn opponent(self) -> SideId {
        match self {
            SideId::Player => SideId::Enemy,
            SideId::Enemy => SideId::Player,
        }
    }
}

/// Battle session phase. `Resolving` only exists while a turn is computed
/// synchronously; the session always leaves resolution in `Message` or a
/// terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    AwaitingInput,
    Resolving,
    Message,
    ForcedSwitch,
    Victory,
    Defeat,
    Fled,
    Caught,
}

impl BattlePhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Fled | BattlePhase::Caught
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleKind {
    Wild,
    Trainer { trainer_name: String, prize_money: u32 },
}

impl BattleKind {
    pub fn is_wild(&self) -> bool {
        matches!(self, BattleKind::Wild)
    }
}

/// How the battle ended. Carried on the state once a terminal phase is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
    Caught(Species),
}

/// One side of the battle: a team, the active slot, and battle-scoped
/// volatile state (stat stages, flee attempts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSide {
    pub name: String,
    pub team: Vec<CreatureInst>,
    pub active_index: usize,
    pub stages: StatStages,
    pub flee_attempts: u8,
}

impl BattleSide {
    pub fn new(name: String, team: Vec<CreatureInst>) -> Result<Self, BattleStateError> {
        if !team.iter().any(|c| !c.is_fainted()) {
            return Err(BattleStateError::EmptyParty);
        }
        // Open with the first non-fainted team member.
        let active_index = team
            .iter()
            .position(|c| !c.is_fainted())
            .ok_or(BattleStateError::EmptyParty)?;

        Ok(BattleSide {
            name,
            team,
            active_index,
            stages: StatStages::new(),
            flee_attempts: 0,
        })
    }

    pub fn active(&self) -> &CreatureInst {
        &self.team[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut CreatureInst {
        &mut self.team[self.active_index]
    }

    /// True if any benched creature can still fight.
    pub fn has_reserves(&self) -> bool {
        self.team
            .iter()
            .enumerate()
            .any(|(i, c)| i != self.active_index && !c.is_fainted())
    }

    /// Index of the next healthy benched creature, if any.
    pub fn next_healthy_reserve(&self) -> Option<usize> {
        self.team
            .iter()
            .enumerate()
            .find(|(i, c)| *i != self.active_index && !c.is_fainted())
            .map(|(i, _)| i)
    }

    /// Make a different team slot active. Stages reset on switch-out; they
    /// never outlive a combatant's tenure.
    pub fn switch_to(&mut self, index: usize) {
        self.stages.reset();
        self.active_index = index;
    }
}

/// HP bar animation state for one side: the displayed value chases the
/// target as the caller feeds elapsed time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HpAnimation {
    pub displayed: f32,
    pub target: u16,
}

impl HpAnimation {
    pub fn snapped_to(value: u16) -> Self {
        HpAnimation {
            displayed: value as f32,
            target: value,
        }
    }

    /// Advance the displayed value toward the target. Tolerates being called
    /// every frame; settles exactly on the target.
    pub fn tick(&mut self, dt_ms: f32) {
        let target = self.target as f32;
        let diff = target - self.displayed;
        if diff == 0.0 {
            return;
        }
        let step = (HP_DRAIN_PER_SEC * dt_ms / 1000.0).min(diff.abs());
        self.displayed += diff.signum() * step;
        if (self.displayed - target).abs() < 0.5 {
            self.displayed = target;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target as f32
    }
}

/// An HP change attached to a queued message, applied to the animation state
/// when that message is shown, not when the turn was computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HpUpdate {
    pub side: SideId,
    pub value: u16,
    /// Snap for send-outs; drain for damage and healing.
    pub snap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedMessage {
    pub text: String,
    pub hp_update: Option<HpUpdate>,
}

/// The aggregate battle state owned by the session controller. The
/// presentation layer reads it between `handle_input`/`tick` calls and never
/// writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    pub kind: BattleKind,
    pub phase: BattlePhase,
    pub turn_number: u32,
    pub sides: [BattleSide; 2],
    pub message_queue: VecDeque<QueuedMessage>,
    pub current_message: Option<String>,
    pub hp_anim: [HpAnimation; 2],
    pub outcome: Option<BattleOutcome>,
    /// Creatures caught while the party was full, awaiting the external
    /// storage system.
    pub storage: Vec<CreatureInst>,
}

impl BattleState {
    pub fn new(kind: BattleKind, player: BattleSide, enemy: BattleSide) -> Self {
        let hp_anim = [
            HpAnimation::snapped_to(player.active().current_hp),
            HpAnimation::snapped_to(enemy.active().current_hp),
        ];
        BattleState {
            kind,
            phase: BattlePhase::Message,
            turn_number: 1,
            sides: [player, enemy],
            message_queue: VecDeque::new(),
            current_message: None,
            hp_anim,
            outcome: None,
            storage: Vec::new(),
        }
    }

    pub fn side(&self, id: SideId) -> &BattleSide {
        &self.sides[id.index()]
    }

    pub fn side_mut(&mut self, id: SideId) -> &mut BattleSide {
        &mut self.sides[id.index()]
    }
}

/// Everything that can happen during resolution, in order. Events double as
/// the engine's log: each formats to the message line the player sees, or to
/// None for silent bookkeeping events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    // Battle framing
    WildAppeared { species: Species },
    TrainerWantsToFight { trainer_name: String },
    GoCreature { name: String, hp: u16 },
    Recalled { name: String },
    TrainerSentOut { trainer_name: String, name: String, hp: u16 },
    TurnStarted { turn_number: u32 },

    // Moves
    MoveUsed { side: SideId, name: String, move_used: Move },
    MoveMissed { name: String },
    NoEffect { defender_name: String },
    Effectiveness { multiplier: f64 },
    CriticalHit,
    DamageDealt { side: SideId, amount: u16, remaining_hp: u16 },
    Healed { side: SideId, name: String, amount: u16, new_hp: u16 },

    // Stat stages
    StatStageChanged { name: String, stat: StatType, delta: i8, capped: bool },

    // Status conditions
    StatusApplied { name: String, status: StatusCondition },
    StatusBlocked { name: String, status: StatusCondition },
    StatusCured { name: String, status: StatusCondition },
    CannotAct { name: String, status: StatusCondition },
    StatusDamage { side: SideId, name: String, status: StatusCondition, damage: u16, remaining_hp: u16 },

    // Fainting and terminal flow
    Fainted { side: SideId, name: String },
    TrainerDefeated { trainer_name: String },
    PrizeMoney { amount: u32 },

    // Progression
    ExpGained { amount: u32 },
    LeveledUp { name: String, level: u8 },
    MoveLearned { name: String, move_learned: Move },
    Evolving { old_name: String },
    Evolved { old_name: String, new_species: Species },

    // Items and capture
    ItemUsed { item: Item },
    CageShake { nth: u8 },
    BrokeFree,
    CaughtCreature { species: Species },
    JoinedParty { species: Species },
    PartyFull,
    SentToStorage { species: Species },

    // Fleeing
    FledSuccessfully,
    FleeFailed,
    CannotEscape,
}

impl BattleEvent {
    /// The player-visible line for this event, or None for silent events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::WildAppeared { species } => {
                Some(format!("A wild {} appeared!", species.name()))
            }
            BattleEvent::TrainerWantsToFight { trainer_name } => {
                Some(format!("{} wants to fight!", trainer_name))
            }
            BattleEvent::GoCreature { name, .. } => Some(format!("Go! {}!", name)),
            BattleEvent::Recalled { name } => Some(format!("Come back, {}!", name)),
            BattleEvent::TrainerSentOut { trainer_name, name, .. } => {
                Some(format!("{} sent out {}!", trainer_name, name))
            }
            BattleEvent::TurnStarted { .. } => None,

            BattleEvent::MoveUsed { name, move_used, .. } => {
                Some(format!("{} used {}!", name, move_used.name()))
            }
            BattleEvent::MoveMissed { name } => Some(format!("{}'s attack missed!", name)),
            BattleEvent::NoEffect { defender_name } => {
                Some(format!("It doesn't affect {}...", defender_name))
            }
            BattleEvent::Effectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m > 0.0 && m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),
            // Damage itself is silent: the HP bar tells the story.
            BattleEvent::DamageDealt { .. } => None,
            BattleEvent::Healed { name, amount, .. } => {
                Some(format!("{} recovered {} HP!", name, amount))
            }

            BattleEvent::StatStageChanged { name, stat, delta, capped } => {
                Some(stat_change_message(name, *stat, *delta, *capped))
            }

            BattleEvent::StatusApplied { name, status } => Some(match status {
                StatusCondition::Paralyzed => {
                    format!("{} is paralyzed! It may be unable to move!", name)
                }
                StatusCondition::Poisoned => format!("{} was poisoned!", name),
                StatusCondition::Burned => format!("{} was burned!", name),
                StatusCondition::Frozen => format!("{} was frozen solid!", name),
                StatusCondition::Asleep(_) => format!("{} fell asleep!", name),
            }),
            BattleEvent::StatusBlocked { name, status } => Some(match status {
                StatusCondition::Paralyzed => format!("{} can't be paralyzed!", name),
                StatusCondition::Poisoned => format!("{} can't be poisoned!", name),
                StatusCondition::Burned => format!("{} can't be burned!", name),
                StatusCondition::Frozen => format!("{} can't be frozen!", name),
                StatusCondition::Asleep(_) => format!("{} can't be put to sleep!", name),
            }),
            BattleEvent::StatusCured { name, status } => Some(match status {
                StatusCondition::Paralyzed => format!("{} is no longer paralyzed!", name),
                StatusCondition::Poisoned => format!("{} is no longer poisoned!", name),
                StatusCondition::Burned => format!("{} is no longer burned!", name),
                StatusCondition::Frozen => format!("{} thawed out!", name),
                StatusCondition::Asleep(_) => format!("{} woke up!", name),
            }),
            BattleEvent::CannotAct { name, status } => Some(match status {
                StatusCondition::Paralyzed => format!("{} is paralyzed! It can't move!", name),
                StatusCondition::Frozen => format!("{} is frozen solid!", name),
                StatusCondition::Asleep(_) => format!("{} is fast asleep!", name),
                _ => format!("{} can't move!", name),
            }),
            BattleEvent::StatusDamage { name, status, .. } => Some(match status {
                StatusCondition::Poisoned => format!("{} is hurt by poison!", name),
                StatusCondition::Burned => format!("{} is hurt by its burn!", name),
                _ => format!("{} is hurt!", name),
            }),

            BattleEvent::Fainted { side, name } => Some(match side {
                SideId::Player => format!("{} fainted!", name),
                SideId::Enemy => format!("Enemy {} fainted!", name),
            }),
            BattleEvent::TrainerDefeated { trainer_name } => {
                Some(format!("Defeated {}!", trainer_name))
            }
            BattleEvent::PrizeMoney { amount } => {
                Some(format!("Got ${} for winning!", amount))
            }

            BattleEvent::ExpGained { amount } => Some(format!("Gained {} EXP!", amount)),
            BattleEvent::LeveledUp { name, level } => {
                Some(format!("{} grew to LV {}!", name, level))
            }
            BattleEvent::MoveLearned { name, move_learned } => {
                Some(format!("{} learned {}!", name, move_learned.name()))
            }
            BattleEvent::Evolving { old_name } => {
                Some(format!("What? {} is evolving!", old_name))
            }
            BattleEvent::Evolved { old_name, new_species } => {
                Some(format!("{} evolved into {}!", old_name, new_species.name()))
            }

            BattleEvent::ItemUsed { item } => Some(format!("Used {}!", item.data().name)),
            BattleEvent::CageShake { nth } => Some(match nth {
                1 => "The cage rattled...".to_string(),
                2 => "The cage rattled again...".to_string(),
                _ => "The cage rattled once more...".to_string(),
            }),
            BattleEvent::BrokeFree => Some("Oh no! It broke free!".to_string()),
            BattleEvent::CaughtCreature { species } => {
                Some(format!("Gotcha! {} was caught!", species.name()))
            }
            BattleEvent::JoinedParty { species } => {
                Some(format!("{} joined your team!", species.name()))
            }
            BattleEvent::PartyFull => Some("Party is full!".to_string()),
            BattleEvent::SentToStorage { species } => {
                Some(format!("{} was sent to storage.", species.name()))
            }

            BattleEvent::FledSuccessfully => Some("Got away safely!".to_string()),
            BattleEvent::FleeFailed => Some("Couldn't escape!".to_string()),
            BattleEvent::CannotEscape => Some("Can't escape!".to_string()),
        }
    }

    /// The HP-bar change this event carries, if any. Applied when the
    /// associated message is dequeued so the drain lines up with the text.
    pub fn hp_update(&self) -> Option<HpUpdate> {
        match self {
            BattleEvent::DamageDealt { side, remaining_hp, .. } => Some(HpUpdate {
                side: *side,
                value: *remaining_hp,
                snap: false,
            }),
            BattleEvent::Healed { side, new_hp, .. } => Some(HpUpdate {
                side: *side,
                value: *new_hp,
                snap: false,
            }),
            BattleEvent::StatusDamage { side, remaining_hp, .. } => Some(HpUpdate {
                side: *side,
                value: *remaining_hp,
                snap: false,
            }),
            BattleEvent::GoCreature { hp, .. } => Some(HpUpdate {
                side: SideId::Player,
                value: *hp,
                snap: true,
            }),
            BattleEvent::TrainerSentOut { hp, .. } => Some(HpUpdate {
                side: SideId::Enemy,
                value: *hp,
                snap: true,
            }),
            _ => None,
        }
    }
}

/// Ordered collection of the events produced by one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Pre-drawn randomness for one turn. Resolution consumes percentile
/// outcomes (1-100) one at a time, each tagged with the reason for the draw;
/// tests supply the exact sequence, production pre-rolls from `rand`.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        // More than any single turn can consume.
        let outcomes: Vec<u8> = (0..100).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}
