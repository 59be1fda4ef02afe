use schema::{BaseStats, ElementType, EvolutionData, Learnset, Move, Species, SpeciesData};
use std::collections::HashMap;
use std::sync::LazyLock;

// Global species data storage - built once on first access, keyed by the
// Species enum. The roster ships with the crate; lookups are total.
static SPECIES_DATA: LazyLock<HashMap<Species, SpeciesData>> = LazyLock::new(build_species_table);

/// Get species data for a specific species from the global store.
pub fn get_species_data(species: Species) -> &'static SpeciesData {
    SPECIES_DATA
        .get(&species)
        .unwrap_or_else(|| panic!("No species data entry for {:?}", species))
}

struct SpeciesEntry {
    dex_number: u16,
    types: Vec<ElementType>,
    // hp, attack, defense, sp_attack, sp_defense, speed
    base_stats: [u8; 6],
    learnset: Vec<(u8, Move)>,
    catch_rate: u8,
    base_exp: u16,
    description: &'static str,
    evolution: Option<(Species, u8)>,
}

fn build_species_table() -> HashMap<Species, SpeciesData> {
    use ElementType::*;
    use Move::*;

    let mut table = HashMap::new();
    let mut add = |species: Species, entry: SpeciesEntry| {
        let [hp, attack, defense, sp_attack, sp_defense, speed] = entry.base_stats;
        table.insert(
            species,
            SpeciesData {
                dex_number: entry.dex_number,
                name: species.name(),
                types: entry.types,
                base_stats: BaseStats {
                    hp,
                    attack,
                    defense,
                    sp_attack,
                    sp_defense,
                    speed,
                },
                learnset: Learnset::new(entry.learnset),
                catch_rate: entry.catch_rate,
                base_exp: entry.base_exp,
                description: entry.description,
                evolution: entry
                    .evolution
                    .map(|(evolves_into, level)| EvolutionData { evolves_into, level }),
            },
        );
    };

    // === Starter line 1: Fire ===
    add(Species::Blacknose, SpeciesEntry {
        dex_number: 1,
        types: vec![Shark],
        base_stats: [44, 52, 40, 50, 44, 56],
        learnset: vec![(1, Tackle), (1, TailWhip), (7, Ember), (13, Bite), (19, FireFang)],
        catch_rate: 45,
        base_exp: 62,
        description: "A curious reef shark with a distinctive dark snout. \
                      Its metabolism runs hot, warming the water around it.",
        evolution: Some((Species::BlacktipReef, 16)),
    });
    add(Species::BlacktipReef, SpeciesEntry {
        dex_number: 2,
        types: vec![Shark, Fire],
        base_stats: [59, 70, 55, 65, 55, 71],
        learnset: vec![
            (1, Tackle), (1, TailWhip), (1, Ember), (1, Bite),
            (22, FireFang), (28, FlameBurst), (34, AquaJet),
        ],
        catch_rate: 45,
        base_exp: 142,
        description: "Its black-tipped fins radiate heat. Known for its speed \
                      and agility when chasing prey through warm shallows.",
        evolution: Some((Species::OceanicBlacktip, 36)),
    });
    add(Species::OceanicBlacktip, SpeciesEntry {
        dex_number: 3,
        types: vec![Shark, Fire],
        base_stats: [78, 88, 73, 85, 73, 92],
        learnset: vec![
            (1, Tackle), (1, Ember), (1, Bite), (1, FireFang),
            (40, Flamethrower), (48, Crunch),
        ],
        catch_rate: 45,
        base_exp: 239,
        description: "The oceanic blacktip at its peak. Water sizzles in its \
                      wake as it pursues prey at blazing speed.",
        evolution: None,
    });

    // === Starter line 2: Fighting ===
    add(Species::Whitenose, SpeciesEntry {
        dex_number: 4,
        types: vec![Shark],
        base_stats: [46, 55, 45, 40, 42, 52],
        learnset: vec![(1, Tackle), (1, TailWhip), (7, Ram), (13, Bite), (19, Thrash)],
        catch_rate: 45,
        base_exp: 62,
        description: "A bold young shark with a pale snout. Fearlessly \
                      approaches anything new, even creatures much larger than itself.",
        evolution: Some((Species::WhitetipReef, 16)),
    });
    add(Species::WhitetipReef, SpeciesEntry {
        dex_number: 5,
        types: vec![Shark, Fighting],
        base_stats: [61, 75, 60, 50, 55, 68],
        learnset: vec![
            (1, Tackle), (1, TailWhip), (1, Ram), (1, Bite),
            (22, Thrash), (28, BrickBreak), (34, AquaJet),
        ],
        catch_rate: 45,
        base_exp: 142,
        description: "An aggressive reef hunter with white-tipped fins. Never \
                      backs down from a fight.",
        evolution: Some((Species::OceanicWhitetip, 36)),
    });
    add(Species::OceanicWhitetip, SpeciesEntry {
        dex_number: 6,
        types: vec![Shark, Fighting],
        base_stats: [80, 98, 78, 60, 70, 82],
        learnset: vec![
            (1, Tackle), (1, Ram), (1, Thrash), (1, BrickBreak),
            (40, CloseCombat), (48, Crunch),
        ],
        catch_rate: 45,
        base_exp: 239,
        description: "The most dangerous shark in open ocean. Its persistence \
                      and aggression are legendary.",
        evolution: None,
    });

    // === Starter line 3: Steel ===
    add(Species::Hardnose, SpeciesEntry {
        dex_number: 7,
        types: vec![Shark],
        base_stats: [48, 48, 55, 45, 50, 45],
        learnset: vec![(1, Tackle), (1, TailWhip), (7, MetalClaw), (13, Bite), (19, IronHead)],
        catch_rate: 45,
        base_exp: 62,
        description: "A tough young shark with unusually hard skin. Its snout \
                      can crack open shellfish with ease.",
        evolution: Some((Species::GreyReef, 16)),
    });
    add(Species::GreyReef, SpeciesEntry {
        dex_number: 8,
        types: vec![Shark, Steel],
        base_stats: [65, 65, 78, 55, 70, 55],
        learnset: vec![
            (1, Tackle), (1, TailWhip), (1, MetalClaw), (1, Bite),
            (22, IronHead), (28, SteelWing), (34, AquaJet),
        ],
        catch_rate: 45,
        base_exp: 142,
        description: "Its scales have hardened into armor plates. Patrols its \
                      reef territory with methodical precision.",
        evolution: Some((Species::Silvertip, 36)),
    });
    add(Species::Silvertip, SpeciesEntry {
        dex_number: 9,
        types: vec![Shark, Steel],
        base_stats: [85, 80, 100, 65, 90, 68],
        learnset: vec![
            (1, Tackle), (1, MetalClaw), (1, IronHead), (1, SteelWing),
            (40, IronTail), (48, Crunch),
        ],
        catch_rate: 45,
        base_exp: 239,
        description: "Chrome-scaled apex predator with distinctive white fin \
                      tips. Its armor deflects most attacks.",
        evolution: None,
    });

    // === Wild creatures ===
    add(Species::Bonnethead, SpeciesEntry {
        dex_number: 10,
        types: vec![Psychic],
        base_stats: [50, 55, 50, 55, 50, 45],
        learnset: vec![(1, Tackle), (1, Confusion), (10, TailWhip), (15, Psybeam)],
        catch_rate: 120,
        base_exp: 60,
        description: "A small hammerhead species with a shovel-shaped head. \
                      Uses electroreception to find buried prey.",
        evolution: Some((Species::ScallopedHammerhead, 22)),
    });
    add(Species::ScallopedHammerhead, SpeciesEntry {
        dex_number: 11,
        types: vec![Psychic],
        base_stats: [75, 80, 70, 80, 70, 65],
        learnset: vec![
            (1, Tackle), (1, Confusion), (1, Psybeam),
            (25, Psystrike), (30, Bite), (35, Crunch),
        ],
        catch_rate: 60,
        base_exp: 170,
        description: "Its wide cephalofoil grants powerful electromagnetic \
                      senses. Can detect heartbeats buried in sand.",
        evolution: None,
    });
    add(Species::Lemon, SpeciesEntry {
        dex_number: 12,
        types: vec![Ground],
        base_stats: [45, 50, 55, 35, 45, 40],
        learnset: vec![(1, Tackle), (1, SandAttack), (8, MudShot), (15, Bite)],
        catch_rate: 190,
        base_exp: 56,
        description: "A yellowish shark that prefers sandy shallows. Often \
                      seen resting motionless on the seafloor.",
        evolution: None,
    });
    add(Species::Nurse, SpeciesEntry {
        dex_number: 13,
        types: vec![Shark],
        base_stats: [40, 45, 35, 40, 35, 55],
        learnset: vec![(1, Tackle), (1, TailWhip), (6, Bite), (12, AquaJet)],
        catch_rate: 255,
        base_exp: 50,
        description: "A docile bottom-dweller found in warm coastal waters. \
                      Commonly seen resting in groups.",
        evolution: None,
    });
    add(Species::AtlanticStingray, SpeciesEntry {
        dex_number: 14,
        types: vec![Ray],
        base_stats: [50, 40, 60, 45, 50, 35],
        learnset: vec![(1, Tackle), (1, TailWhip), (7, WingAttack), (14, WaterGun)],
        catch_rate: 190,
        base_exp: 54,
        description: "A small ray that glides along sandy bottoms. Its tail \
                      barb is still developing.",
        evolution: None,
    });
    add(Species::Lanternshark, SpeciesEntry {
        dex_number: 15,
        types: vec![Electric],
        base_stats: [35, 40, 40, 60, 45, 50],
        learnset: vec![(1, Tackle), (1, ThunderShock), (9, Spark), (16, Bite)],
        catch_rate: 190,
        base_exp: 55,
        description: "A tiny deep-sea shark with bioluminescent photophores. \
                      Glows to camouflage against dim light above.",
        evolution: None,
    });
    add(Species::Wobbegong, SpeciesEntry {
        dex_number: 16,
        types: vec![Algae],
        base_stats: [55, 45, 55, 50, 55, 30],
        learnset: vec![(1, Tackle), (1, VineWhip), (8, Absorb), (15, Bite)],
        catch_rate: 190,
        base_exp: 58,
        description: "A flat carpet shark covered in algae-like tassels. \
                      Nearly invisible among kelp and coral.",
        evolution: None,
    });
    add(Species::Megalodon, SpeciesEntry {
        dex_number: 31,
        types: vec![Fossil, Leviathan],
        base_stats: [110, 120, 95, 80, 85, 70],
        learnset: vec![
            (1, Tackle), (1, Bite), (1, RockThrow), (1, AncientPower),
            (50, LeviathanRage), (60, Crunch),
        ],
        catch_rate: 3,
        base_exp: 270,
        description: "The legendary giant shark revived. At 60 feet long, it \
                      dwarfs all modern sharks.",
        evolution: None,
    });

    table
}
