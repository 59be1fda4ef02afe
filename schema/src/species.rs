use crate::elements::ElementType;
use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Every battlable species in the dex. The enum is the lookup key for the
/// static data table; the numeric dex ordering lives in `SpeciesData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Species {
    Blacknose,
    BlacktipReef,
    OceanicBlacktip,
    Whitenose,
    WhitetipReef,
    OceanicWhitetip,
    Hardnose,
    GreyReef,
    Silvertip,
    Bonnethead,
    ScallopedHammerhead,
    Lemon,
    Nurse,
    AtlanticStingray,
    Lanternshark,
    Wobbegong,
    Megalodon,
}

impl Species {
    /// Display name as shown in battle messages and the dex.
    pub fn name(&self) -> &'static str {
        match self {
            Species::Blacknose => "Blacknose Shark",
            Species::BlacktipReef => "Blacktip Reef Shark",
            Species::OceanicBlacktip => "Oceanic Blacktip",
            Species::Whitenose => "Whitenose Shark",
            Species::WhitetipReef => "Whitetip Reef Shark",
            Species::OceanicWhitetip => "Oceanic Whitetip",
            Species::Hardnose => "Hardnose Shark",
            Species::GreyReef => "Grey Reef Shark",
            Species::Silvertip => "Silvertip Shark",
            Species::Bonnethead => "Bonnethead",
            Species::ScallopedHammerhead => "Scalloped Hammerhead",
            Species::Lemon => "Lemon Shark",
            Species::Nurse => "Nurse Shark",
            Species::AtlanticStingray => "Atlantic Stingray",
            Species::Lanternshark => "Lanternshark",
            Species::Wobbegong => "Wobbegong",
            Species::Megalodon => "Megalodon",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

/// Level-up move list, sorted ascending by level. Level 1 entries are the
/// species' innate moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Learnset {
    pub level_up: Vec<(u8, Move)>,
}

impl Learnset {
    pub fn new(level_up: Vec<(u8, Move)>) -> Self {
        Learnset { level_up }
    }

    /// Moves newly learned at exactly this level.
    pub fn learns_at_level(&self, level: u8) -> impl Iterator<Item = Move> + '_ {
        self.level_up
            .iter()
            .filter(move |(l, _)| *l == level)
            .map(|(_, m)| *m)
    }

    /// All moves known at or below the given level, in learn order.
    pub fn known_at_level(&self, level: u8) -> Vec<Move> {
        self.level_up
            .iter()
            .filter(|(l, _)| *l <= level)
            .map(|(_, m)| *m)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionData {
    pub evolves_into: Species,
    pub level: u8,
}

// No Deserialize: the name and description are &'static str, and species
// data is compiled in rather than loaded.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesData {
    pub dex_number: u16,
    pub name: &'static str,
    pub types: Vec<ElementType>,
    pub base_stats: BaseStats,
    pub learnset: Learnset,
    /// 0-255, higher is easier to cage.
    pub catch_rate: u8,
    /// Base experience yield when defeated.
    pub base_exp: u16,
    pub description: &'static str,
    pub evolution: Option<EvolutionData>,
}
