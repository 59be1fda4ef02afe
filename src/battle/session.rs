//! The battle session controller: owns the battle state, dispatches player
//! input by phase, and drains the message queue one entry at a time.
//!
//! The presentation layer calls `handle_input` on player intent, `tick` with
//! frame deltas for the HP drain, and re-reads the state between calls. The
//! engine never advances on its own clock: a queued message stays current
//! until an explicit `Advance`.

use crate::battle::ai::{Behavior, RandomAI, ScoringAI};
use crate::battle::state::{
    BattleEvent, BattleKind, BattleOutcome, BattlePhase, BattleSide, BattleState, EventBus,
    QueuedMessage, SideId, TurnRng,
};
use crate::battle::turn::{cure_matches, execute_forced_replacement, resolve_turn, TurnAction};
use crate::creature::CreatureInst;
use crate::errors::{ActionError, BattleResult};
use schema::{Item, ItemKind, Species};

/// Player intent, routed by the current phase. Menu navigation lives in the
/// presentation layer; the engine only sees committed choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Advance past the current message (confirm pressed / text finished).
    Advance,
    Fight { move_index: usize },
    UseItem { item: Item },
    Switch { team_index: usize },
    Flee,
    ChooseReplacement { team_index: usize },
}

/// Static description of an opposing trainer.
#[derive(Debug, Clone)]
pub struct TrainerData {
    pub name: String,
    pub prize_money: u32,
    pub team: Vec<(Species, u8)>,
}

/// Everything handed back to the overworld when the session ends. The party
/// carries its battle wear (HP, status, exp); the wild opponent is gone
/// unless it was caught.
#[derive(Debug)]
pub struct BattleSummary {
    pub outcome: Option<BattleOutcome>,
    pub party: Vec<CreatureInst>,
    /// Caught creatures that did not fit in the party, for the storage system.
    pub storage: Vec<CreatureInst>,
}

pub struct BattleSession {
    state: BattleState,
    enemy_behavior: Box<dyn Behavior>,
}

impl BattleSession {
    /// Start a wild encounter. The party is borrowed for the battle's
    /// duration (moved in, returned by `end_battle`).
    pub fn start_wild(
        party: Vec<CreatureInst>,
        species: Species,
        level: u8,
    ) -> BattleResult<Self> {
        let enemy = CreatureInst::new(species, level);
        let player_side = BattleSide::new("Player".to_string(), party)?;
        let enemy_side = BattleSide::new("Wild".to_string(), vec![enemy])?;

        let state = BattleState::new(BattleKind::Wild, player_side, enemy_side);

        let mut bus = EventBus::new();
        bus.push(BattleEvent::WildAppeared { species });
        bus.push(BattleEvent::GoCreature {
            name: state.side(SideId::Player).active().name().to_string(),
            hp: state.side(SideId::Player).active().current_hp,
        });

        let mut session = BattleSession {
            state,
            enemy_behavior: Box::new(RandomAI),
        };
        session.enqueue_events(&bus);
        session.state.phase = BattlePhase::Message;
        session.advance_message();
        Ok(session)
    }

    /// Start a trainer battle against a scripted team.
    pub fn start_trainer(party: Vec<CreatureInst>, trainer: TrainerData) -> BattleResult<Self> {
        let team: Vec<CreatureInst> = trainer
            .team
            .iter()
            .map(|&(species, level)| CreatureInst::new(species, level))
            .collect();

        let player_side = BattleSide::new("Player".to_string(), party)?;
        let enemy_side = BattleSide::new(trainer.name.clone(), team)?;

        let state = BattleState::new(
            BattleKind::Trainer {
                trainer_name: trainer.name.clone(),
                prize_money: trainer.prize_money,
            },
            player_side,
            enemy_side,
        );

        let mut bus = EventBus::new();
        bus.push(BattleEvent::TrainerWantsToFight {
            trainer_name: trainer.name,
        });
        bus.push(BattleEvent::GoCreature {
            name: state.side(SideId::Player).active().name().to_string(),
            hp: state.side(SideId::Player).active().current_hp,
        });

        let mut session = BattleSession {
            state,
            enemy_behavior: Box::new(ScoringAI::new()),
        };
        session.enqueue_events(&bus);
        session.state.phase = BattlePhase::Message;
        session.advance_message();
        Ok(session)
    }

    /// Swap the opponent policy (scripted trainers, tests).
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.enemy_behavior = behavior;
        self
    }

    /// Read-only snapshot for the presentation layer.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Advance the HP-drain animation by a frame delta. Safe to call every
    /// frame in any phase.
    pub fn tick(&mut self, dt_ms: f32) {
        for anim in &mut self.state.hp_anim {
            anim.tick(dt_ms);
        }
    }

    /// The single input entry point. Invalid selections are silent no-ops:
    /// the phase does not change and nothing is queued.
    pub fn handle_input(&mut self, input: PlayerInput) {
        self.handle_input_with_rng(input, TurnRng::new_random());
    }

    /// As `handle_input`, with the turn's randomness supplied by the caller.
    pub fn handle_input_with_rng(&mut self, input: PlayerInput, mut rng: TurnRng) {
        match self.state.phase {
            BattlePhase::Message => {
                if input == PlayerInput::Advance {
                    self.advance_message();
                }
            }
            BattlePhase::AwaitingInput => {
                let Some(action) = self.action_for_input(input) else {
                    return;
                };
                if self.validate_action(action).is_err() {
                    return;
                }
                let enemy_action = self.enemy_behavior.choose_action(&self.state, SideId::Enemy);
                let bus = resolve_turn(&mut self.state, action, enemy_action, &mut rng);
                self.enqueue_events(&bus);
                self.state.phase = BattlePhase::Message;
                self.advance_message();
            }
            BattlePhase::ForcedSwitch => {
                if let PlayerInput::ChooseReplacement { team_index } = input {
                    if self.validate_replacement(team_index).is_err() {
                        return;
                    }
                    let bus = execute_forced_replacement(&mut self.state, team_index);
                    self.enqueue_events(&bus);
                    self.state.phase = BattlePhase::Message;
                    self.advance_message();
                }
            }
            // Terminal phases and mid-resolution accept no input.
            _ => {}
        }
    }

    /// Tear down the session, committing battle wear back to the party.
    pub fn end_battle(self) -> BattleSummary {
        let BattleState {
            outcome,
            sides,
            storage,
            ..
        } = self.state;
        let [player_side, _enemy_side] = sides;

        BattleSummary {
            outcome,
            party: player_side.team,
            storage,
        }
    }

    fn action_for_input(&self, input: PlayerInput) -> Option<TurnAction> {
        match input {
            PlayerInput::Fight { move_index } => Some(TurnAction::Attack { move_index }),
            PlayerInput::UseItem { item } => Some(TurnAction::UseItem { item }),
            PlayerInput::Switch { team_index } => Some(TurnAction::Switch { team_index }),
            PlayerInput::Flee => Some(TurnAction::Flee),
            PlayerInput::Advance | PlayerInput::ChooseReplacement { .. } => None,
        }
    }

    /// Validation for menu selections. A rejection keeps the menu open with
    /// no message queued.
    fn validate_action(&self, action: TurnAction) -> Result<(), ActionError> {
        let player = self.state.side(SideId::Player);

        match action {
            TurnAction::Attack { move_index } => {
                let instance = player
                    .active()
                    .moves
                    .get(move_index)
                    .ok_or(ActionError::InvalidMoveIndex(move_index))?;
                if instance.pp == 0 {
                    return Err(ActionError::NoPpRemaining);
                }
                Ok(())
            }
            TurnAction::Switch { team_index } => self.validate_switch_target(team_index),
            TurnAction::UseItem { item } => match item.data().kind {
                ItemKind::Cage { .. } => {
                    if !self.state.kind.is_wild() {
                        return Err(ActionError::CaptureNotAllowed);
                    }
                    Ok(())
                }
                ItemKind::Potion { .. } => {
                    let active = player.active();
                    if active.current_hp == active.max_hp() {
                        return Err(ActionError::ItemWouldHaveNoEffect);
                    }
                    Ok(())
                }
                ItemKind::CureStatus(cure) => match player.active().status {
                    Some(status) if cure_matches(cure, status) => Ok(()),
                    _ => Err(ActionError::ItemWouldHaveNoEffect),
                },
            },
            TurnAction::Flee => Ok(()),
        }
    }

    fn validate_switch_target(&self, team_index: usize) -> Result<(), ActionError> {
        let player = self.state.side(SideId::Player);
        let target = player
            .team
            .get(team_index)
            .ok_or(ActionError::InvalidSwitchTarget(team_index))?;
        if target.is_fainted() {
            return Err(ActionError::SwitchTargetFainted(team_index));
        }
        if team_index == player.active_index {
            return Err(ActionError::SwitchTargetActive(team_index));
        }
        Ok(())
    }

    fn validate_replacement(&self, team_index: usize) -> Result<(), ActionError> {
        self.validate_switch_target(team_index)
    }

    /// Flatten resolution events into the message queue. Silent events with
    /// an HP payload ride along on the previous message so the bar moves
    /// with the line that caused it.
    fn enqueue_events(&mut self, bus: &EventBus) {
        for event in bus.events() {
            let text = event.format();
            let hp_update = event.hp_update();

            match (text, hp_update) {
                (Some(text), update) => {
                    self.state.message_queue.push_back(QueuedMessage {
                        text,
                        hp_update: update,
                    });
                }
                (None, Some(update)) => {
                    // Attach to the latest queued message (e.g. silent
                    // DamageDealt after "X used Y!").
                    if let Some(last) = self.state.message_queue.back_mut() {
                        last.hp_update = Some(update);
                    } else {
                        self.state.hp_anim[update.side.index()].target = update.value;
                        if update.snap {
                            self.state.hp_anim[update.side.index()] =
                                crate::battle::state::HpAnimation::snapped_to(update.value);
                        }
                    }
                }
                (None, None) => {}
            }
        }
    }

    /// Show the next queued message, or finish the message phase when the
    /// queue is dry.
    fn advance_message(&mut self) {
        if let Some(message) = self.state.message_queue.pop_front() {
            if let Some(update) = message.hp_update {
                let anim = &mut self.state.hp_anim[update.side.index()];
                if update.snap {
                    *anim = crate::battle::state::HpAnimation::snapped_to(update.value);
                } else {
                    anim.target = update.value;
                }
            }
            self.state.current_message = Some(message.text);
        } else {
            self.finish_message_phase();
        }
    }

    fn finish_message_phase(&mut self) {
        self.state.current_message = None;

        match self.state.outcome {
            Some(BattleOutcome::Victory) => self.state.phase = BattlePhase::Victory,
            Some(BattleOutcome::Defeat) => self.state.phase = BattlePhase::Defeat,
            Some(BattleOutcome::Fled) => self.state.phase = BattlePhase::Fled,
            Some(BattleOutcome::Caught(_)) => self.state.phase = BattlePhase::Caught,
            None => {
                // A fainted active creature with the battle still live means
                // a replacement must be chosen before the next turn.
                if self.state.side(SideId::Player).active().is_fainted() {
                    self.state.phase = BattlePhase::ForcedSwitch;
                } else {
                    self.state.phase = BattlePhase::AwaitingInput;
                }
            }
        }
    }
}
