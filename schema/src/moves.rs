use crate::elements::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Move {
    // Basic
    Tackle,
    Bite,
    TailWhip,
    // Freshwater
    WaterGun,
    AquaJet,
    WaterPulse,
    Surf,
    HydroPump,
    // Fighting
    Ram,
    Thrash,
    BrickBreak,
    CloseCombat,
    // Deepsea
    Pursuit,
    Crunch,
    Frenzy,
    // Psychic
    Confusion,
    Psybeam,
    Psystrike,
    Hypnosis,
    // Electric
    Spark,
    ThunderShock,
    Thunderbolt,
    ThunderWave,
    // Fire
    Ember,
    FireFang,
    FlameBurst,
    Flamethrower,
    WillOWisp,
    // Steel
    MetalClaw,
    IronHead,
    SteelWing,
    IronTail,
    HardenScales,
    // Ground
    SandAttack,
    MudShot,
    // Breaching
    WingAttack,
    // Algae
    VineWhip,
    Absorb,
    SleepPowder,
    StunSpore,
    // Ice
    PowderSnow,
    IceFang,
    IceBeam,
    // Poison
    PoisonSting,
    Toxic,
    // Fossil
    RockThrow,
    AncientPower,
    // Leviathan
    LeviathanRage,
}

impl Move {
    /// Display name as printed in battle messages.
    pub fn name(&self) -> &'static str {
        match self {
            Move::Tackle => "TACKLE",
            Move::Bite => "BITE",
            Move::TailWhip => "TAIL WHIP",
            Move::WaterGun => "WATER GUN",
            Move::AquaJet => "AQUA JET",
            Move::WaterPulse => "WATER PULSE",
            Move::Surf => "SURF",
            Move::HydroPump => "HYDRO PUMP",
            Move::Ram => "RAM",
            Move::Thrash => "THRASH",
            Move::BrickBreak => "BRICK BREAK",
            Move::CloseCombat => "CLOSE COMBAT",
            Move::Pursuit => "PURSUIT",
            Move::Crunch => "CRUNCH",
            Move::Frenzy => "FRENZY",
            Move::Confusion => "CONFUSION",
            Move::Psybeam => "PSYBEAM",
            Move::Psystrike => "PSYSTRIKE",
            Move::Hypnosis => "HYPNOSIS",
            Move::Spark => "SPARK",
            Move::ThunderShock => "THUNDER SHOCK",
            Move::Thunderbolt => "THUNDERBOLT",
            Move::ThunderWave => "THUNDER WAVE",
            Move::Ember => "EMBER",
            Move::FireFang => "FIRE FANG",
            Move::FlameBurst => "FLAME BURST",
            Move::Flamethrower => "FLAMETHROWER",
            Move::WillOWisp => "WILL-O-WISP",
            Move::MetalClaw => "METAL CLAW",
            Move::IronHead => "IRON HEAD",
            Move::SteelWing => "STEEL WING",
            Move::IronTail => "IRON TAIL",
            Move::HardenScales => "HARDEN SCALES",
            Move::SandAttack => "SAND ATTACK",
            Move::MudShot => "MUD SHOT",
            Move::WingAttack => "WING ATTACK",
            Move::VineWhip => "VINE WHIP",
            Move::Absorb => "ABSORB",
            Move::SleepPowder => "SLEEP POWDER",
            Move::StunSpore => "STUN SPORE",
            Move::PowderSnow => "POWDER SNOW",
            Move::IceFang => "ICE FANG",
            Move::IceBeam => "ICE BEAM",
            Move::PoisonSting => "POISON STING",
            Move::Toxic => "TOXIC",
            Move::RockThrow => "ROCK THROW",
            Move::AncientPower => "ANCIENT POWER",
            Move::LeviathanRage => "LEVIATHAN RAGE",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// The five stats a battle stage can modify. HP is never staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

/// Secondary and primary move effects. Chances are percentages; a primary
/// status-move effect carries 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    StatChange(Target, StatType, i8, u8),
    Paralyze(u8),
    Poison(u8),
    Burn(u8),
    Freeze(u8),
    Sedate(u8),
}

// No Deserialize: the description is &'static str, and move data is
// compiled in rather than loaded.
#[derive(Debug, Clone, Serialize)]
pub struct MoveData {
    pub move_type: ElementType,
    pub category: MoveCategory,
    pub power: u8,
    /// None means the move never misses.
    pub accuracy: Option<u8>,
    pub max_pp: u8,
    /// Non-zero priority overrides speed ordering entirely.
    pub priority: i8,
    pub effects: Vec<MoveEffect>,
    pub description: &'static str,
}
