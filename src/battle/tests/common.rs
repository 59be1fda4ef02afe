use crate::battle::ai::Behavior;
use crate::battle::state::{
    BattleKind, BattleSide, BattleState, EventBus, SideId, TurnRng,
};
use crate::battle::turn::TurnAction;
use crate::creature::{CreatureInst, MoveInstance, StatusCondition};
use schema::{Move, Species};

/// A builder for creating test creatures with common defaults.
///
/// # Example
/// ```ignore
/// let creature = TestCreatureBuilder::new(Species::Nurse, 10)
///     .with_moves(vec![Move::Tackle])
///     .with_status(StatusCondition::Paralyzed)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    species: Species,
    level: u8,
    moves: Option<Vec<Move>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
    max_hp: Option<u16>,
    speed: Option<u16>,
}

impl TestCreatureBuilder {
    pub fn new(species: Species, level: u8) -> Self {
        Self {
            species,
            level,
            moves: None,
            status: None,
            current_hp: None,
            max_hp: None,
            speed: None,
        }
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Pin both max and current HP to an exact value.
    pub fn with_max_hp(mut self, hp: u16) -> Self {
        self.max_hp = Some(hp);
        self
    }

    /// Pin the derived speed stat to an exact value.
    pub fn with_speed(mut self, speed: u16) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn build(self) -> CreatureInst {
        let mut creature = CreatureInst::new(self.species, self.level);

        if let Some(moves) = self.moves {
            creature.moves = moves.into_iter().map(MoveInstance::new).collect();
        }
        if let Some(max_hp) = self.max_hp {
            creature.stats.hp = max_hp;
            creature.current_hp = max_hp;
        }
        if let Some(speed) = self.speed {
            creature.stats.speed = speed;
        }
        if let Some(hp) = self.current_hp {
            creature.current_hp = hp.min(creature.max_hp());
        }
        creature.status = self.status;

        creature
    }
}

/// A standard 1v1 wild battle for testing.
pub fn create_wild_battle(player: CreatureInst, enemy: CreatureInst) -> BattleState {
    create_wild_battle_with_party(vec![player], enemy)
}

pub fn create_wild_battle_with_party(
    party: Vec<CreatureInst>,
    enemy: CreatureInst,
) -> BattleState {
    BattleState::new(
        BattleKind::Wild,
        BattleSide::new("Player".to_string(), party).unwrap(),
        BattleSide::new("Wild".to_string(), vec![enemy]).unwrap(),
    )
}

pub fn create_trainer_battle(
    party: Vec<CreatureInst>,
    trainer_name: &str,
    enemy_team: Vec<CreatureInst>,
) -> BattleState {
    BattleState::new(
        BattleKind::Trainer {
            trainer_name: trainer_name.to_string(),
            prize_money: 500,
        },
        BattleSide::new("Player".to_string(), party).unwrap(),
        BattleSide::new(trainer_name.to_string(), enemy_team).unwrap(),
    )
}

/// A `TurnRng` with plenty of mid-range values, for tests where the exact
/// outcomes don't matter (no crits at 50, every accuracy check passes).
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 50])
}

/// The player-visible lines produced by a resolution pass, in order.
pub fn formatted_lines(bus: &EventBus) -> Vec<String> {
    bus.events().iter().filter_map(|e| e.format()).collect()
}

/// Which sides used a move this turn, in order.
pub fn move_users(bus: &EventBus) -> Vec<SideId> {
    bus.events()
        .iter()
        .filter_map(|e| match e {
            crate::battle::state::BattleEvent::MoveUsed { side, .. } => Some(*side),
            _ => None,
        })
        .collect()
}

/// An opponent policy that always picks the same move slot.
pub struct ScriptedAI(pub usize);

impl Behavior for ScriptedAI {
    fn choose_action(&self, _state: &BattleState, _side: SideId) -> TurnAction {
        TurnAction::Attack { move_index: self.0 }
    }
}
