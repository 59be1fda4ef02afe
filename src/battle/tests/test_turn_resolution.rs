use crate::battle::state::{BattleEvent, BattleOutcome, SideId, TurnRng};
use crate::battle::tests::common::*;
use crate::battle::turn::{resolve_turn, TurnAction};
use pretty_assertions::assert_eq;
use schema::{Item, Move, Species};

fn tackle_action() -> TurnAction {
    TurnAction::Attack { move_index: 0 }
}

#[test]
fn faster_side_resolves_first() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .with_max_hp(30)
        .with_speed(40)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_max_hp(30)
        .with_speed(35)
        .build();
    let mut state = create_wild_battle(player, enemy);

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50, 50, 100, 50]);
    let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

    assert_eq!(move_users(&bus), vec![SideId::Player, SideId::Enemy]);

    // The defender took damage from the player's hit.
    assert!(state.side(SideId::Enemy).active().current_hp < 30);
    assert_eq!(state.outcome, None);
    assert_eq!(state.turn_number, 2);
}

#[test]
fn speed_tie_always_resolves_player_first() {
    // The ordering must not depend on any random draw: vary every roll and
    // the player still opens.
    for seed in [1u8, 25, 50, 75, 100] {
        let player = TestCreatureBuilder::new(Species::Whitenose, 10)
            .with_moves(vec![Move::Tackle])
            .with_speed(40)
            .build();
        let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
            .with_moves(vec![Move::Tackle])
            .with_speed(40)
            .build();
        let mut state = create_wild_battle(player, enemy);

        let rng = &mut TurnRng::new_for_test(vec![seed; 10]);
        let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);
        assert_eq!(move_users(&bus)[0], SideId::Player);
    }
}

#[test]
fn priority_move_outruns_higher_speed() {
    let player = TestCreatureBuilder::new(Species::Nurse, 12)
        .with_moves(vec![Move::AquaJet])
        .with_speed(10)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Whitenose, 12)
        .with_moves(vec![Move::Tackle])
        .with_speed(200)
        .build();
    let mut state = create_wild_battle(player, enemy);

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50, 50, 100, 50]);
    let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

    assert_eq!(move_users(&bus), vec![SideId::Player, SideId::Enemy]);
}

#[test]
fn faint_skips_the_second_action_entirely() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(40)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_hp(1)
        .with_speed(35)
        .build();
    let mut state = create_wild_battle(player, enemy);

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50]);
    let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

    // Only the player's move ever ran; no message from the fainted side.
    assert_eq!(move_users(&bus), vec![SideId::Player]);
    assert_eq!(state.outcome, Some(BattleOutcome::Victory));

    let lines = formatted_lines(&bus);
    assert!(lines.contains(&"Enemy Nurse Shark fainted!".to_string()));
}

#[test]
fn spec_exchange_reaches_victory_without_defender_acting() {
    // Two level-10 creatures, 30 HP each, player faster. A string of
    // 100%-accuracy hits must end in victory with the slower side never
    // having queued a single message.
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .with_max_hp(30)
        .with_speed(40)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_max_hp(30)
        .with_speed(35)
        .build();
    let mut state = create_wild_battle(player, enemy);

    let mut enemy_acted = false;
    for _ in 0..30 {
        let before = state.side(SideId::Enemy).active().current_hp;
        let rng = &mut TurnRng::new_for_test(vec![50, 100, 50, 50, 100, 50]);
        let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);
        enemy_acted |= move_users(&bus).contains(&SideId::Enemy);

        let after = state.side(SideId::Enemy).active().current_hp;
        assert!(after < before, "defender HP must strictly decrease");

        if state.outcome.is_some() {
            assert_eq!(state.outcome, Some(BattleOutcome::Victory));
            // The killing turn queued nothing from the defender.
            assert_eq!(move_users(&bus), vec![SideId::Player]);
            return;
        }
        assert!(enemy_acted, "defender acts while still standing");
        enemy_acted = false;
    }
    panic!("battle should have ended within 30 turns");
}

#[test]
fn a_missed_move_deals_no_damage() {
    let player = TestCreatureBuilder::new(Species::AtlanticStingray, 14)
        .with_moves(vec![Move::HydroPump])
        .with_speed(99)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(1)
        .build();
    let mut state = create_wild_battle(player, enemy);
    let enemy_hp = state.side(SideId::Enemy).active().current_hp;

    // 81 fails the 80% accuracy check; enemy's turn follows normally.
    let rng = &mut TurnRng::new_for_test(vec![81, 50, 100, 50]);
    let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

    assert_eq!(state.side(SideId::Enemy).active().current_hp, enemy_hp);
    let lines = formatted_lines(&bus);
    assert!(lines.contains(&"Atlantic Stingray's attack missed!".to_string()));
}

#[test]
fn switch_resolves_before_the_attack() {
    let lead = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let reserve = TestCreatureBuilder::new(Species::Hardnose, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(1)
        .build();
    let mut state = create_wild_battle_with_party(vec![lead, reserve], enemy);
    let reserve_hp = state.side(SideId::Player).team[1].current_hp;

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50]);
    let bus = resolve_turn(
        &mut state,
        TurnAction::Switch { team_index: 1 },
        tackle_action(),
        rng,
    );

    // Despite the enemy's laughable speed, the switch happened first and the
    // incoming creature absorbed the hit.
    assert_eq!(state.side(SideId::Player).active_index, 1);
    assert!(state.side(SideId::Player).active().current_hp < reserve_hp);

    let lines = formatted_lines(&bus);
    assert_eq!(lines[0], "Come back, Whitenose Shark!");
    assert_eq!(lines[1], "Go! Hardnose Shark!");
}

#[test]
fn switching_out_resets_stat_stages() {
    let lead = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let reserve = TestCreatureBuilder::new(Species::Hardnose, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(1)
        .build();
    let mut state = create_wild_battle_with_party(vec![lead, reserve], enemy);
    state.sides[0].stages.apply_delta(schema::StatType::Attack, 3);

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50]);
    resolve_turn(
        &mut state,
        TurnAction::Switch { team_index: 1 },
        tackle_action(),
        rng,
    );

    assert_eq!(state.sides[0].stages, crate::stat_stages::StatStages::new());
}

#[test]
fn potion_heals_then_enemy_still_acts() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .with_hp(5)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let mut state = create_wild_battle(player, enemy);

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50]);
    let bus = resolve_turn(
        &mut state,
        TurnAction::UseItem { item: Item::Potion },
        tackle_action(),
        rng,
    );

    let lines = formatted_lines(&bus);
    assert_eq!(lines[0], "Used POTION!");
    assert!(lines[1].contains("recovered"));
    // The item consumed the turn; the opponent attacked afterwards.
    assert_eq!(move_users(&bus), vec![SideId::Enemy]);
}

#[test]
fn flee_succeeds_outright_when_not_slower() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(50)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(50)
        .build();
    let mut state = create_wild_battle(player, enemy);

    let rng = &mut TurnRng::new_for_test(vec![100]);
    let bus = resolve_turn(&mut state, TurnAction::Flee, tackle_action(), rng);

    assert_eq!(state.outcome, Some(BattleOutcome::Fled));
    assert_eq!(move_users(&bus), Vec::<SideId>::new());
    assert_eq!(formatted_lines(&bus), vec!["Got away safely!"]);
}

#[test]
fn failed_flee_gives_the_opponent_a_free_action() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(35)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(70)
        .build();
    let mut state = create_wild_battle(player, enemy);
    let player_hp = state.side(SideId::Player).active().current_hp;

    // Odds: (35*128/70 + 30) * 100 / 256 = 36%. A roll of 37 fails.
    let rng = &mut TurnRng::new_for_test(vec![37, 50, 100, 50]);
    let bus = resolve_turn(&mut state, TurnAction::Flee, tackle_action(), rng);

    assert_eq!(state.outcome, None);
    assert_eq!(move_users(&bus), vec![SideId::Enemy]);
    assert!(state.side(SideId::Player).active().current_hp < player_hp);
    assert!(formatted_lines(&bus).contains(&"Couldn't escape!".to_string()));

    // The failure is recoverable: the next attempt has better odds.
    assert_eq!(state.side(SideId::Player).flee_attempts, 1);
}

#[test]
fn trainer_battles_never_allow_fleeing() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let mut state = create_trainer_battle(vec![player], "Diver Marco", vec![enemy]);

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50]);
    let bus = resolve_turn(&mut state, TurnAction::Flee, tackle_action(), rng);

    assert_eq!(state.outcome, None);
    assert!(formatted_lines(&bus).contains(&"Can't escape!".to_string()));
    // The wasted attempt still hands the opponent its action.
    assert_eq!(move_users(&bus), vec![SideId::Enemy]);
}

#[test]
fn no_effect_hit_skips_damage_and_messages_it() {
    // Electric vs Ground-type Lemon Shark.
    let player = TestCreatureBuilder::new(Species::Lanternshark, 16)
        .with_moves(vec![Move::ThunderShock])
        .with_speed(99)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Lemon, 16)
        .with_moves(vec![Move::Tackle])
        .with_speed(1)
        .build();
    let mut state = create_wild_battle(player, enemy);
    let enemy_hp = state.side(SideId::Enemy).active().current_hp;

    // Player: accuracy only (immunity short-circuits before crit/variance,
    // and the paralysis secondary never rolls). Enemy: full attack.
    let rng = &mut TurnRng::new_for_test(vec![50, 50, 100, 50]);
    let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

    assert_eq!(state.side(SideId::Enemy).active().current_hp, enemy_hp);
    assert_eq!(state.side(SideId::Enemy).active().status, None);
    assert!(formatted_lines(&bus).contains(&"It doesn't affect Lemon Shark...".to_string()));
}

#[test]
fn pp_is_spent_per_use() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .build();
    let mut state = create_wild_battle(player, enemy);
    let pp_before = state.side(SideId::Player).active().moves[0].pp;

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50, 50, 100, 50]);
    resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

    assert_eq!(state.side(SideId::Player).active().moves[0].pp, pp_before - 1);
}

#[test]
fn hp_invariant_holds_through_a_long_battle() {
    let player = TestCreatureBuilder::new(Species::Whitenose, 20)
        .with_moves(vec![Move::Tackle])
        .build();
    let enemy = TestCreatureBuilder::new(Species::Silvertip, 20)
        .with_moves(vec![Move::Tackle])
        .build();
    let mut state = create_wild_battle(player, enemy);

    for _ in 0..50 {
        if state.outcome.is_some() {
            break;
        }
        let rng = &mut predictable_rng();
        resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

        for side in [SideId::Player, SideId::Enemy] {
            let creature = state.side(side).active();
            assert!(creature.current_hp <= creature.max_hp());
        }

        if state.side(SideId::Player).active().is_fainted() {
            break;
        }
    }
}

#[test]
fn fainted_attacker_event_order_is_complete() {
    // The faint line follows the damage, then the exp award.
    let player = TestCreatureBuilder::new(Species::Whitenose, 10)
        .with_moves(vec![Move::Tackle])
        .with_speed(40)
        .build();
    let enemy = TestCreatureBuilder::new(Species::Nurse, 10)
        .with_moves(vec![Move::Tackle])
        .with_hp(1)
        .with_speed(35)
        .build();
    let mut state = create_wild_battle(player, enemy);

    let rng = &mut TurnRng::new_for_test(vec![50, 100, 50]);
    let bus = resolve_turn(&mut state, tackle_action(), tackle_action(), rng);

    let kinds: Vec<&str> = bus
        .events()
        .iter()
        .map(|e| match e {
            BattleEvent::TurnStarted { .. } => "turn",
            BattleEvent::MoveUsed { .. } => "move",
            BattleEvent::DamageDealt { .. } => "damage",
            BattleEvent::Fainted { .. } => "faint",
            BattleEvent::ExpGained { .. } => "exp",
            _ => "other",
        })
        .collect();

    let faint_pos = kinds.iter().position(|&k| k == "faint").unwrap();
    let damage_pos = kinds.iter().position(|&k| k == "damage").unwrap();
    let exp_pos = kinds.iter().position(|&k| k == "exp").unwrap();
    assert!(damage_pos < faint_pos);
    assert!(faint_pos < exp_pos);
}
