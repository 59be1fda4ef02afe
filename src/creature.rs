use crate::move_data::get_move_max_pp;
use crate::progression::exp_for_level;
use crate::species_data::get_species_data;
use schema::{BaseStats, Move, Species, SpeciesData};
use serde::{Deserialize, Serialize};

/// Hard level cap matching the cubic experience curve.
pub const MAX_LEVEL: u8 = 100;

/// A creature can know at most four moves at a time.
pub const MAX_MOVES: usize = 4;

/// Non-volatile status conditions. Mutually exclusive; a creature holds at
/// most one at a time. Sleep carries its remaining-turns counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Paralyzed,
    Poisoned,
    Burned,
    Frozen,
    Asleep(u8),
}

impl StatusCondition {
    /// Short label shown next to the HP bar.
    pub fn label(&self) -> &'static str {
        match self {
            StatusCondition::Paralyzed => "PAR",
            StatusCondition::Poisoned => "PSN",
            StatusCondition::Burned => "BRN",
            StatusCondition::Frozen => "FRZ",
            StatusCondition::Asleep(_) => "SLP",
        }
    }
}

/// Derived battle stats, computed once from species base stats and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub move_: Move,
    pub pp: u8,
}

impl MoveInstance {
    pub fn new(move_: Move) -> Self {
        MoveInstance {
            move_,
            pp: get_move_max_pp(move_),
        }
    }

    pub fn max_pp(&self) -> u8 {
        get_move_max_pp(self.move_)
    }

    /// Spend one PP. Returns false if the move had none left.
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }
}

/// A specific battlable creature: a species at a level with mutable HP,
/// status, moves, and experience. Party members persist across battles;
/// a wild encounter's instance is discarded at battle end unless caught.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureInst {
    pub species: Species,
    pub nickname: Option<String>,
    pub level: u8,
    pub exp: u32,
    pub stats: Stats,
    pub current_hp: u16,
    pub moves: Vec<MoveInstance>,
    pub status: Option<StatusCondition>,
}

impl CreatureInst {
    /// Create a battle-ready instance of a species at a level. A requested
    /// level below 1 is clamped to 1. Stats are derived deterministically;
    /// the instance starts at full HP with no status, knowing the last four
    /// moves of its learnset at or below the level.
    pub fn new(species: Species, level: u8) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let data = get_species_data(species);
        let stats = calculate_stats(&data.base_stats, level);

        let moves = derive_moves(data, level)
            .into_iter()
            .map(MoveInstance::new)
            .collect();

        CreatureInst {
            species,
            nickname: None,
            level,
            exp: exp_for_level(level),
            stats,
            current_hp: stats.hp,
            moves,
            status: None,
        }
    }

    /// Display name: nickname when set, species name otherwise.
    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or_else(|| self.species.name())
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Reduce HP, clamping at zero.
    pub fn take_damage(&mut self, amount: u16) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Restore HP, clamping at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp());
        self.current_hp - before
    }

    /// Recompute derived stats after a level or species change, healing by
    /// any max-HP gain (current HP never exceeds the new max).
    pub fn recalculate_stats(&mut self) {
        let old_max = self.max_hp();
        self.stats = calculate_stats(&get_species_data(self.species).base_stats, self.level);
        let hp_gain = self.stats.hp.saturating_sub(old_max);
        self.current_hp = (self.current_hp + hp_gain).min(self.stats.hp);
    }

    pub fn known_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().map(|m| m.move_)
    }

    /// Learn a move, replacing the oldest known move when already at four.
    pub fn learn_move(&mut self, move_: Move) {
        if self.known_moves().any(|m| m == move_) {
            return;
        }
        if self.moves.len() >= MAX_MOVES {
            self.moves.remove(0);
        }
        self.moves.push(MoveInstance::new(move_));
    }
}

/// Derived stat formulas. Monotonic non-decreasing in level for a fixed base.
pub fn calculate_stats(base: &BaseStats, level: u8) -> Stats {
    let level = level as u32;
    let hp = (2 * base.hp as u32 * level) / 100 + level + 10;
    let other = |base_stat: u8| ((2 * base_stat as u32 * level) / 100 + 5) as u16;

    Stats {
        hp: hp as u16,
        attack: other(base.attack),
        defense: other(base.defense),
        sp_attack: other(base.sp_attack),
        sp_defense: other(base.sp_defense),
        speed: other(base.speed),
    }
}

/// The last four moves of the learnset at or below the level, in learn order.
fn derive_moves(data: &SpeciesData, level: u8) -> Vec<Move> {
    let mut known = data.learnset.known_at_level(level);
    known.dedup();
    if known.len() > MAX_MOVES {
        known.split_off(known.len() - MAX_MOVES)
    } else {
        known
    }
}
