use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ElementType {
    Shark,
    Leviathan,
    Breaching,
    Fighting,
    Psychic,
    Freshwater,
    Fire,
    Fairy,
    Algae,
    Steel,
    Ghost,
    Deepsea,
    Poison,
    Ray,
    Ice,
    Electric,
    Fossil,
    Ground,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ElementType {
    /// Effectiveness multiplier of a single attacking element against a single
    /// defending element.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective,
    /// 0.0 = No Effect.
    pub fn type_effectiveness(attacking: ElementType, defending: ElementType) -> f64 {
        use ElementType::*;

        match (attacking, defending) {
            // Shark: plain physicality, resisted by trained fighters
            (Shark, Fighting) => 0.5,
            (Shark, _) => 1.0,

            // Leviathan: only other giants withstand a giant
            (Leviathan, Leviathan) => 2.0,
            (Leviathan, Ice) => 0.5,
            (Leviathan, _) => 1.0,

            // Breaching: aerial strikes
            (Breaching, Fighting) | (Breaching, Algae) => 2.0,
            (Breaching, Electric) | (Breaching, Ice) => 0.5,
            (Breaching, _) => 1.0,

            // Fighting
            (Fighting, Shark) | (Fighting, Steel) | (Fighting, Ice) => 2.0,
            (Fighting, Breaching) | (Fighting, Psychic) => 0.5,
            (Fighting, _) => 1.0,

            // Psychic
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, Ghost) => 0.5,
            (Psychic, Deepsea) => 0.0,
            (Psychic, _) => 1.0,

            // Freshwater
            (Freshwater, Fire) | (Freshwater, Fossil) => 2.0,
            (Freshwater, Electric) | (Freshwater, Algae) => 0.5,
            (Freshwater, _) => 1.0,

            // Fire
            (Fire, Algae) | (Fire, Steel) | (Fire, Ice) => 2.0,
            (Fire, Freshwater) | (Fire, Fossil) => 0.5,
            (Fire, _) => 1.0,

            // Fairy
            (Fairy, Fighting) | (Fairy, Leviathan) | (Fairy, Deepsea) => 2.0,
            (Fairy, Poison) | (Fairy, Steel) => 0.5,
            (Fairy, _) => 1.0,

            // Algae
            (Algae, Freshwater) | (Algae, Fossil) | (Algae, Ground) => 2.0,
            (Algae, Fire) | (Algae, Ice) | (Algae, Poison) => 0.5,
            (Algae, _) => 1.0,

            // Steel
            (Steel, Fairy) | (Steel, Ice) | (Steel, Fossil) => 2.0,
            (Steel, Fire) | (Steel, Fighting) | (Steel, Ground) => 0.5,
            (Steel, _) => 1.0,

            // Ghost
            (Ghost, Ghost) | (Ghost, Psychic) => 2.0,
            (Ghost, Shark) => 0.0,
            (Ghost, Deepsea) => 0.5,
            (Ghost, _) => 1.0,

            // Deepsea
            (Deepsea, Ghost) | (Deepsea, Psychic) => 2.0,
            (Deepsea, Fighting) | (Deepsea, Fairy) => 0.5,
            (Deepsea, _) => 1.0,

            // Poison
            (Poison, Fairy) | (Poison, Algae) => 2.0,
            (Poison, Ground) | (Poison, Psychic) | (Poison, Poison) => 0.5,
            (Poison, Steel) => 0.0,
            (Poison, _) => 1.0,

            // Ray
            (Ray, Algae) | (Ray, Psychic) | (Ray, Deepsea) => 2.0,
            (Ray, Breaching) | (Ray, Fire) | (Ray, Fossil) => 0.5,
            (Ray, _) => 1.0,

            // Ice
            (Ice, Breaching) | (Ice, Algae) | (Ice, Leviathan) => 2.0,
            (Ice, Fire) | (Ice, Fighting) | (Ice, Fossil) | (Ice, Freshwater) | (Ice, Steel) => 0.5,
            (Ice, _) => 1.0,

            // Electric
            (Electric, Freshwater) | (Electric, Breaching) => 2.0,
            (Electric, Ground) => 0.0,
            (Electric, Electric) => 0.5,
            (Electric, _) => 1.0,

            // Fossil
            (Fossil, Fire) | (Fossil, Ice) | (Fossil, Breaching) => 2.0,
            (Fossil, Freshwater) | (Fossil, Fighting) | (Fossil, Algae) | (Fossil, Steel) => 0.5,
            (Fossil, _) => 1.0,

            // Ground
            (Ground, Electric) | (Ground, Poison) | (Ground, Fire) | (Ground, Steel) => 2.0,
            (Ground, Freshwater) | (Ground, Ice) | (Ground, Algae) => 0.5,
            (Ground, Breaching) => 0.0,
            (Ground, _) => 1.0,
        }
    }
}
