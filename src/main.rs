//! Interactive battle demo: a text front-end driving the battle session the
//! same way the game client would.

use rand::Rng;
use reef_adventure::{
    BattlePhase, BattleSession, CreatureInst, Item, PlayerInput, SideId, Species,
};
use std::io::{self, BufRead, Write};

const WILD_POOL: [Species; 5] = [
    Species::Nurse,
    Species::Lemon,
    Species::Lanternshark,
    Species::Wobbegong,
    Species::AtlanticStingray,
];

fn main() {
    let mut rng = rand::rng();

    let party = vec![
        CreatureInst::new(Species::Blacknose, 12),
        CreatureInst::new(Species::Hardnose, 10),
    ];

    let species = WILD_POOL[rng.random_range(0..WILD_POOL.len())];
    let level = rng.random_range(8..=12);

    let mut session = match BattleSession::start_wild(party, species, level) {
        Ok(session) => session,
        Err(e) => {
            println!("Could not start battle: {}", e);
            return;
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        // The CLI has no frame clock; settle the HP bars instantly.
        session.tick(60_000.0);

        match session.state().phase {
            BattlePhase::Message => {
                if let Some(message) = &session.state().current_message {
                    println!("{}", message);
                }
                wait_for_enter(&mut lines);
                session.handle_input(PlayerInput::Advance);
            }
            BattlePhase::AwaitingInput => {
                print_status(&session);
                match read_command(&mut lines, &session) {
                    Some(input) => session.handle_input(input),
                    None => continue,
                }
            }
            BattlePhase::ForcedSwitch => {
                println!("Choose the next shark:");
                let team = &session.state().side(SideId::Player).team;
                for (i, creature) in team.iter().enumerate() {
                    if !creature.is_fainted() {
                        println!("  {}: {} (HP {}/{})", i, creature.name(),
                            creature.current_hp, creature.max_hp());
                    }
                }
                if let Some(index) = read_index(&mut lines) {
                    session.handle_input(PlayerInput::ChooseReplacement { team_index: index });
                }
            }
            phase => {
                println!("--- Battle over: {:?} ---", phase);
                break;
            }
        }
    }

    let summary = session.end_battle();
    println!("Outcome: {:?}", summary.outcome);
    for creature in &summary.party {
        println!(
            "  {} LV {} HP {}/{}",
            creature.name(),
            creature.level,
            creature.current_hp,
            creature.max_hp()
        );
    }
}

fn print_status(session: &BattleSession) {
    let state = session.state();
    let player = state.side(SideId::Player).active();
    let enemy = state.side(SideId::Enemy).active();

    println!();
    println!(
        "Wild {}  HP {}/{}",
        enemy.name(),
        enemy.current_hp,
        enemy.max_hp()
    );
    println!(
        "{}  HP {}/{}{}",
        player.name(),
        player.current_hp,
        player.max_hp(),
        player.status.map(|s| format!(" [{}]", s.label())).unwrap_or_default()
    );

    println!("Moves:");
    for (i, instance) in player.moves.iter().enumerate() {
        println!(
            "  {}: {} (PP {}/{})",
            i + 1,
            instance.move_.name(),
            instance.pp,
            instance.max_pp()
        );
    }
    println!("Commands: 1-4 fight | c cage | p potion | s switch | r run");
}

fn read_command(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    session: &BattleSession,
) -> Option<PlayerInput> {
    print!("> ");
    io::stdout().flush().ok();

    let line = lines.next()?.ok()?;
    match line.trim() {
        "c" => Some(PlayerInput::UseItem { item: Item::ReefCage }),
        "p" => Some(PlayerInput::UseItem { item: Item::Potion }),
        "r" => Some(PlayerInput::Flee),
        "s" => {
            let team = &session.state().side(SideId::Player).team;
            let active = session.state().side(SideId::Player).active_index;
            for (i, creature) in team.iter().enumerate() {
                if i != active && !creature.is_fainted() {
                    return Some(PlayerInput::Switch { team_index: i });
                }
            }
            println!("No other sharks!");
            None
        }
        n => {
            let index: usize = n.parse().ok()?;
            (1..=4).contains(&index).then(|| PlayerInput::Fight {
                move_index: index - 1,
            })
        }
    }
}

fn read_index(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<usize> {
    print!("> ");
    io::stdout().flush().ok();
    lines.next()?.ok()?.trim().parse().ok()
}

fn wait_for_enter(lines: &mut impl Iterator<Item = io::Result<String>>) {
    let _ = lines.next();
}
