use serde::{Deserialize, Serialize};
use std::fmt;

/// Items the battle engine knows how to apply. Inventory bookkeeping (counts,
/// purchase, bag UI) belongs to the caller; the engine only consumes an item
/// the caller has already decided to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    // Cages (capture items)
    ReefCage,
    GreatCage,
    UltraCage,
    MasterCage,
    // Potions
    Potion,
    SuperPotion,
    HyperPotion,
    MaxPotion,
    // Status cures
    Antidote,
    ParalyzeHeal,
    Awakening,
    BurnHeal,
    IceHeal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Capture cage with a catch-rate modifier. A modifier of 255 or more
    /// never fails.
    Cage { modifier: f32 },
    /// Restores up to `heal` HP; u16::MAX restores to full.
    Potion { heal: u16 },
    /// Cures the matching status condition.
    CureStatus(StatusCure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCure {
    Poison,
    Paralysis,
    Sleep,
    Burn,
    Freeze,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ItemData {
    pub name: &'static str,
    pub kind: ItemKind,
    pub description: &'static str,
}

impl Item {
    pub fn data(&self) -> ItemData {
        match self {
            Item::ReefCage => ItemData {
                name: "REEF CAGE",
                kind: ItemKind::Cage { modifier: 1.0 },
                description: "A standard cage for catching wild sharks.",
            },
            Item::GreatCage => ItemData {
                name: "GREAT CAGE",
                kind: ItemKind::Cage { modifier: 1.5 },
                description: "A better cage with a higher catch rate.",
            },
            Item::UltraCage => ItemData {
                name: "ULTRA CAGE",
                kind: ItemKind::Cage { modifier: 2.0 },
                description: "A high-performance catching cage.",
            },
            Item::MasterCage => ItemData {
                name: "MASTER CAGE",
                kind: ItemKind::Cage { modifier: 255.0 },
                description: "The ultimate cage. Never fails.",
            },
            Item::Potion => ItemData {
                name: "POTION",
                kind: ItemKind::Potion { heal: 20 },
                description: "Restores 20 HP.",
            },
            Item::SuperPotion => ItemData {
                name: "SUPER POTION",
                kind: ItemKind::Potion { heal: 50 },
                description: "Restores 50 HP.",
            },
            Item::HyperPotion => ItemData {
                name: "HYPER POTION",
                kind: ItemKind::Potion { heal: 200 },
                description: "Restores 200 HP.",
            },
            Item::MaxPotion => ItemData {
                name: "MAX POTION",
                kind: ItemKind::Potion { heal: u16::MAX },
                description: "Fully restores HP.",
            },
            Item::Antidote => ItemData {
                name: "ANTIDOTE",
                kind: ItemKind::CureStatus(StatusCure::Poison),
                description: "Cures poison.",
            },
            Item::ParalyzeHeal => ItemData {
                name: "PARALYZE HEAL",
                kind: ItemKind::CureStatus(StatusCure::Paralysis),
                description: "Cures paralysis.",
            },
            Item::Awakening => ItemData {
                name: "AWAKENING",
                kind: ItemKind::CureStatus(StatusCure::Sleep),
                description: "Wakes up a sleeping shark.",
            },
            Item::BurnHeal => ItemData {
                name: "BURN HEAL",
                kind: ItemKind::CureStatus(StatusCure::Burn),
                description: "Heals burns.",
            },
            Item::IceHeal => ItemData {
                name: "ICE HEAL",
                kind: ItemKind::CureStatus(StatusCure::Freeze),
                description: "Thaws a frozen shark.",
            },
        }
    }

    pub fn is_cage(&self) -> bool {
        matches!(self.data().kind, ItemKind::Cage { .. })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data().name)
    }
}
