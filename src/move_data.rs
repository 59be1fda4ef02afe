use schema::{ElementType, Move, MoveCategory, MoveData, MoveEffect, StatType, Target};
use std::collections::HashMap;
use std::sync::LazyLock;

// Global move data storage - built once on first access. Move data is
// compiled in; a missing entry is a roster bug, not a runtime condition.
static MOVE_DATA: LazyLock<HashMap<Move, MoveData>> = LazyLock::new(build_move_table);

/// Get move data for a specific move from the global store.
pub fn get_move_data(move_: Move) -> &'static MoveData {
    MOVE_DATA
        .get(&move_)
        .unwrap_or_else(|| panic!("No move data entry for {:?}", move_))
}

/// Get max PP for a specific move.
pub fn get_move_max_pp(move_: Move) -> u8 {
    get_move_data(move_).max_pp
}

fn build_move_table() -> HashMap<Move, MoveData> {
    use ElementType::*;
    use MoveCategory::*;
    use MoveEffect::*;

    let mut table = HashMap::new();
    let mut add = |move_: Move,
                   move_type: ElementType,
                   category: MoveCategory,
                   power: u8,
                   accuracy: Option<u8>,
                   max_pp: u8,
                   priority: i8,
                   effects: Vec<MoveEffect>,
                   description: &'static str| {
        table.insert(
            move_,
            MoveData {
                move_type,
                category,
                power,
                accuracy,
                max_pp,
                priority,
                effects,
                description,
            },
        );
    };

    // Basic
    add(Move::Tackle, Shark, Physical, 40, Some(100), 35, 0, vec![],
        "A full-body charge attack.");
    add(Move::Bite, Deepsea, Physical, 60, Some(100), 25, 0, vec![],
        "Bites with sharp fangs.");
    add(Move::TailWhip, Shark, Status, 0, Some(100), 30, 0,
        vec![StatChange(Target::Target, StatType::Defense, -1, 100)],
        "Lowers the foe's Defense.");

    // Freshwater
    add(Move::WaterGun, Freshwater, Special, 40, Some(100), 25, 0, vec![],
        "Squirts water to attack.");
    add(Move::AquaJet, Freshwater, Physical, 40, Some(100), 20, 1, vec![],
        "Strikes first with a jet of water.");
    add(Move::WaterPulse, Freshwater, Special, 60, Some(100), 20, 0, vec![],
        "Attacks with ultrasonic waves.");
    add(Move::Surf, Freshwater, Special, 90, Some(100), 15, 0, vec![],
        "A huge wave crashes down.");
    add(Move::HydroPump, Freshwater, Special, 110, Some(80), 5, 0, vec![],
        "Blasts water at high pressure.");

    // Fighting
    add(Move::Ram, Fighting, Physical, 50, Some(100), 25, 0, vec![],
        "Rams the foe with force.");
    add(Move::Thrash, Fighting, Physical, 75, Some(100), 15, 0, vec![],
        "A reckless thrashing attack.");
    add(Move::BrickBreak, Fighting, Physical, 75, Some(100), 15, 0, vec![],
        "A powerful strike that breaks barriers.");
    add(Move::CloseCombat, Fighting, Physical, 120, Some(100), 5, 0,
        vec![StatChange(Target::User, StatType::Defense, -1, 100)],
        "All-out attack that lowers own defenses.");

    // Deepsea
    add(Move::Pursuit, Deepsea, Physical, 40, Some(100), 20, 0, vec![],
        "Chases down fleeing foes.");
    add(Move::Crunch, Deepsea, Physical, 80, Some(100), 15, 0,
        vec![StatChange(Target::Target, StatType::Defense, -1, 20)],
        "Crunches with powerful jaws. May lower Defense.");
    add(Move::Frenzy, Deepsea, Status, 0, None, 20, 0,
        vec![StatChange(Target::User, StatType::Attack, 2, 100)],
        "Whips into a feeding frenzy, sharply raising Attack.");

    // Psychic
    add(Move::Confusion, Psychic, Special, 50, Some(100), 25, 0, vec![],
        "A weak psychic attack.");
    add(Move::Psybeam, Psychic, Special, 65, Some(100), 20, 0, vec![],
        "Fires a peculiar ray.");
    add(Move::Psystrike, Psychic, Special, 90, Some(100), 10, 0, vec![],
        "A strong psychic attack.");
    add(Move::Hypnosis, Psychic, Status, 0, Some(60), 20, 0, vec![Sedate(100)],
        "A hypnotic suggestion that puts the foe to sleep.");

    // Electric
    add(Move::Spark, Electric, Physical, 65, Some(100), 20, 0, vec![Paralyze(30)],
        "An electrically charged tackle. May paralyze.");
    add(Move::ThunderShock, Electric, Special, 40, Some(100), 30, 0, vec![Paralyze(10)],
        "An electric shock attack. May paralyze.");
    add(Move::Thunderbolt, Electric, Special, 90, Some(100), 15, 0, vec![Paralyze(10)],
        "A strong electrical attack. May paralyze.");
    add(Move::ThunderWave, Electric, Status, 0, Some(90), 20, 0, vec![Paralyze(100)],
        "A weak electric shock that paralyzes.");

    // Fire
    add(Move::Ember, Fire, Special, 40, Some(100), 25, 0, vec![Burn(10)],
        "A weak fiery attack. May burn.");
    add(Move::FireFang, Fire, Physical, 65, Some(95), 15, 0, vec![Burn(10)],
        "Bites with flame-cloaked fangs. May burn.");
    add(Move::FlameBurst, Fire, Special, 70, Some(100), 15, 0, vec![],
        "A bursting flame attack.");
    add(Move::Flamethrower, Fire, Special, 90, Some(100), 15, 0, vec![Burn(10)],
        "A powerful stream of fire. May burn.");
    add(Move::WillOWisp, Fire, Status, 0, Some(85), 15, 0, vec![Burn(100)],
        "Eerie flames that inflict a burn.");

    // Steel
    add(Move::MetalClaw, Steel, Physical, 50, Some(95), 35, 0,
        vec![StatChange(Target::User, StatType::Attack, 1, 10)],
        "Claws with steel. May raise Attack.");
    add(Move::IronHead, Steel, Physical, 80, Some(100), 15, 0, vec![],
        "Slams with a steel-hard head.");
    add(Move::SteelWing, Steel, Physical, 60, Some(95), 25, 0,
        vec![StatChange(Target::User, StatType::Defense, 1, 10)],
        "Strikes with hardened fins. May raise Defense.");
    add(Move::IronTail, Steel, Physical, 100, Some(75), 15, 0,
        vec![StatChange(Target::Target, StatType::Defense, -1, 30)],
        "Slams with a steel-hard tail. May lower Defense.");
    add(Move::HardenScales, Steel, Status, 0, None, 30, 0,
        vec![StatChange(Target::User, StatType::Defense, 1, 100)],
        "Stiffens armored scales to raise Defense.");

    // Ground
    add(Move::SandAttack, Ground, Status, 0, Some(100), 15, 0,
        vec![StatChange(Target::Target, StatType::Speed, -1, 100)],
        "Kicks up blinding sand to slow the foe.");
    add(Move::MudShot, Ground, Special, 55, Some(95), 15, 0, vec![],
        "Hurls mud at the target.");

    // Breaching
    add(Move::WingAttack, Breaching, Physical, 60, Some(100), 35, 0, vec![],
        "Strikes with wide pectoral fins.");

    // Algae
    add(Move::VineWhip, Algae, Physical, 45, Some(100), 25, 0, vec![],
        "Whips with slender kelp fronds.");
    add(Move::Absorb, Algae, Special, 20, Some(100), 25, 0, vec![],
        "Drains nutrients from the foe.");
    add(Move::SleepPowder, Algae, Status, 0, Some(75), 15, 0, vec![Sedate(100)],
        "Scatters sleep-inducing dust.");
    add(Move::StunSpore, Algae, Status, 0, Some(75), 30, 0, vec![Paralyze(100)],
        "Scatters paralyzing spores.");

    // Ice
    add(Move::PowderSnow, Ice, Special, 40, Some(100), 25, 0, vec![Freeze(10)],
        "A chilling flurry. May freeze.");
    add(Move::IceFang, Ice, Physical, 65, Some(95), 15, 0, vec![Freeze(10)],
        "Bites with freezing fangs. May freeze.");
    add(Move::IceBeam, Ice, Special, 90, Some(100), 10, 0, vec![Freeze(10)],
        "Fires a freezing beam. May freeze.");

    // Poison
    add(Move::PoisonSting, Poison, Physical, 15, Some(100), 35, 0, vec![MoveEffect::Poison(30)],
        "A toxic barb strike. May poison.");
    add(Move::Toxic, Poison, Status, 0, Some(90), 10, 0, vec![MoveEffect::Poison(100)],
        "Badly poisons the target.");

    // Fossil
    add(Move::RockThrow, Fossil, Physical, 50, Some(90), 15, 0, vec![],
        "Hurls a chunk of ancient stone.");
    add(Move::AncientPower, Fossil, Special, 60, Some(100), 5, 0, vec![],
        "Channels primordial energy.");

    // Leviathan
    add(Move::LeviathanRage, Leviathan, Special, 80, Some(100), 10, 0, vec![],
        "The fury of the ancient giants.");

    table
}
