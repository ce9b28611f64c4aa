//! Navigation through the real screen registry.

use kanji_battle::core::{BattleTuning, GameContext, GameEvent, MusicTrack, ScreenArg, ScreenError};
use kanji_battle::screens::{build_registry, names, ScreenInput, ScreenKind, ScreenMachine};
use kanji_battle::stages::{
    builtin_catalog, ChallengeTemplate, EnemyTemplate, ReadingKind, StageCatalog, StageInfo,
    StageSource,
};
use std::rc::Rc;

fn machine_with(catalog: StageCatalog, damage: u32) -> ScreenMachine {
    build_registry(
        Rc::new(catalog),
        BattleTuning::default().with_fixed_damage(damage),
        None,
    )
}

/// One stage with a single 4-hp enemy and the kanji 山, plus a stage with
/// no kanji at all.
fn small_catalog() -> StageCatalog {
    let enemy = EnemyTemplate {
        id: "slime".to_string(),
        name: "Slime".to_string(),
        level: 1,
        max_hp: 4,
        attack_power: 5,
    };
    let kanji = ChallengeTemplate {
        id: "g1-yama".to_string(),
        text: "山".to_string(),
        onyomi: vec!["サン".to_string()],
        kunyomi: vec!["やま".to_string()],
        weakness: ReadingKind::Onyomi,
        meaning: "mountain".to_string(),
        stroke_count: 3,
    };
    let stages = vec![
        StageInfo {
            id: "meadow".to_string(),
            name: "Meadow".to_string(),
            grade: 1,
            enemy_ids: vec!["slime".to_string()],
            challenge_ids: vec!["g1-yama".to_string()],
        },
        StageInfo {
            id: "empty".to_string(),
            name: "Empty".to_string(),
            grade: 1,
            enemy_ids: vec!["slime".to_string()],
            challenge_ids: Vec::new(),
        },
    ];
    StageCatalog::from_parts(stages, vec![enemy], vec![kanji])
}

fn type_answer(machine: &mut ScreenMachine, ctx: &mut GameContext, answer: &str) {
    for c in answer.chars() {
        machine.handle_input(ctx, ScreenInput::Char(c)).unwrap();
    }
}

fn battle_session_active(machine: &ScreenMachine) -> bool {
    matches!(machine.current(), Some(ScreenKind::Battle(screen)) if screen.session().is_some())
}

#[test]
fn test_unknown_screen_is_an_error_and_keeps_current() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(builtin_catalog(), 4);
    machine.change(&mut ctx, names::TITLE, None).unwrap();

    let err = machine.change(&mut ctx, "nowhere", None).unwrap_err();
    assert_eq!(err, ScreenError::UnknownScreen("nowhere".to_string()));
    assert_eq!(machine.current_name(), Some(names::TITLE));
}

#[test]
fn test_title_to_stage_select() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(builtin_catalog(), 4);
    machine.change(&mut ctx, names::TITLE, None).unwrap();
    assert!(ctx
        .pending_events()
        .contains(&GameEvent::PlayMusic(MusicTrack::Title)));

    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();
    assert_eq!(machine.current_name(), Some(names::STAGE_SELECT));
}

#[test]
fn test_stage_select_enters_battle() {
    let mut ctx = GameContext::with_seed(3);
    let catalog = builtin_catalog();
    let first_stage = catalog.stage_list()[0].id.clone();
    let mut machine = machine_with(catalog, 4);

    machine.change(&mut ctx, names::STAGE_SELECT, None).unwrap();
    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();
    assert_eq!(machine.current_name(), Some(first_stage.as_str()));
    assert!(battle_session_active(&machine));
}

#[test]
fn test_victory_records_clear_and_shows_result() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(small_catalog(), 4);
    machine.change(&mut ctx, "meadow", None).unwrap();

    type_answer(&mut machine, &mut ctx, "やま");
    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();
    assert_eq!(machine.current_name(), Some("meadow"));

    machine.update(&mut ctx, 0.5).unwrap();
    assert_eq!(machine.current_name(), Some(names::RESULT_WIN));
    assert!(ctx.collection.is_stage_cleared("meadow"));
    assert!(ctx.last_report.as_ref().unwrap().victory);
    assert!(ctx
        .pending_events()
        .contains(&GameEvent::PlayMusic(MusicTrack::Victory)));

    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();
    assert_eq!(machine.current_name(), Some(names::STAGE_SELECT));
}

#[test]
fn test_defeat_leads_to_game_over() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(small_catalog(), 1);
    machine.change(&mut ctx, "meadow", None).unwrap();
    ctx.player.hp = 5;

    type_answer(&mut machine, &mut ctx, "はずれ");
    machine.handle_input(&mut ctx, ScreenInput::Function(1)).unwrap();
    assert_eq!(ctx.player.hp, 0);
    assert_eq!(machine.current_name(), Some("meadow"));

    machine.update(&mut ctx, 0.5).unwrap();
    assert_eq!(machine.current_name(), Some(names::GAME_OVER));
    assert!(!ctx.collection.is_stage_cleared("meadow"));
}

#[test]
fn test_leaving_battle_cancels_pending_turn() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(small_catalog(), 1);
    machine.change(&mut ctx, "meadow", None).unwrap();

    type_answer(&mut machine, &mut ctx, "さん");
    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();
    assert_eq!(ctx.player.hp, 100);

    machine.handle_input(&mut ctx, ScreenInput::Escape).unwrap();
    assert_eq!(machine.current_name(), Some(names::STAGE_SELECT));
    match machine.screen("meadow") {
        Some(ScreenKind::Battle(screen)) => assert!(screen.session().is_none()),
        _ => panic!("meadow should be a battle screen"),
    }

    machine.update(&mut ctx, 5.0).unwrap();
    assert_eq!(ctx.player.hp, 100);
    assert_eq!(machine.current_name(), Some(names::STAGE_SELECT));
}

#[test]
fn test_reentering_battle_starts_fresh_session() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(small_catalog(), 1);
    machine.change(&mut ctx, "meadow", None).unwrap();
    type_answer(&mut machine, &mut ctx, "さん");
    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();

    machine.change(&mut ctx, "meadow", None).unwrap();
    match machine.current() {
        Some(ScreenKind::Battle(screen)) => {
            let session = screen.session().unwrap();
            assert_eq!(session.current_enemy().hp, 4);
            assert!(session.accepts_input());
            assert_eq!(session.pending_step(), None);
        }
        _ => panic!("expected battle screen"),
    }
}

#[test]
fn test_empty_stage_redirects_with_notice() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(small_catalog(), 4);
    machine.change(&mut ctx, "empty", None).unwrap();

    assert_eq!(machine.current_name(), Some(names::STAGE_SELECT));
    match machine.current() {
        Some(ScreenKind::StageSelect(screen)) => {
            assert!(screen.notice().unwrap().contains("empty"));
        }
        _ => panic!("expected stage select"),
    }
}

#[test]
fn test_notice_arg_reaches_stage_select() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(builtin_catalog(), 4);
    machine
        .change(
            &mut ctx,
            names::STAGE_SELECT,
            Some(ScreenArg::Notice("hello".to_string())),
        )
        .unwrap();
    match machine.current() {
        Some(ScreenKind::StageSelect(screen)) => assert_eq!(screen.notice(), Some("hello")),
        _ => panic!("expected stage select"),
    }
}

#[test]
fn test_dex_round_trip_from_stage_select() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(builtin_catalog(), 4);
    machine.change(&mut ctx, names::STAGE_SELECT, None).unwrap();

    machine.handle_input(&mut ctx, ScreenInput::Char('m')).unwrap();
    assert_eq!(machine.current_name(), Some(names::MONSTER_DEX));
    machine.handle_input(&mut ctx, ScreenInput::Escape).unwrap();
    assert_eq!(machine.current_name(), Some(names::STAGE_SELECT));

    machine.handle_input(&mut ctx, ScreenInput::Char('k')).unwrap();
    assert_eq!(machine.current_name(), Some(names::KANJI_DEX));
}

#[test]
fn test_missed_kanji_can_be_reviewed_from_stage_select() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(small_catalog(), 4);
    machine.change(&mut ctx, "meadow", None).unwrap();

    type_answer(&mut machine, &mut ctx, "はずれ");
    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();
    assert_eq!(
        ctx.collection.review_queue.iter().collect::<Vec<_>>(),
        vec!["g1-yama"]
    );

    machine.handle_input(&mut ctx, ScreenInput::Escape).unwrap();
    machine.handle_input(&mut ctx, ScreenInput::Char('r')).unwrap();
    assert_eq!(machine.current_name(), Some(names::REVIEW_STAGE));
    match machine.current() {
        Some(ScreenKind::Battle(screen)) => {
            assert!(screen.is_review());
            let session = screen.session().unwrap();
            assert_eq!(session.current_challenge().id, "g1-yama");
            assert_eq!(session.current_enemy().id, "slime");
        }
        _ => panic!("expected review battle"),
    }

    type_answer(&mut machine, &mut ctx, "やま");
    machine.handle_input(&mut ctx, ScreenInput::Enter).unwrap();
    assert!(ctx.collection.review_queue.is_empty());

    machine.update(&mut ctx, 0.5).unwrap();
    assert_eq!(machine.current_name(), Some(names::RESULT_WIN));
    assert!(!ctx.collection.is_stage_cleared("meadow"));
    assert!(!ctx.collection.is_stage_cleared(names::REVIEW_STAGE));
}

#[test]
fn test_review_with_empty_queue_stays_on_stage_select() {
    let mut ctx = GameContext::with_seed(3);
    let mut machine = machine_with(small_catalog(), 4);
    machine.change(&mut ctx, names::STAGE_SELECT, None).unwrap();

    machine.handle_input(&mut ctx, ScreenInput::Char('r')).unwrap();
    assert_eq!(machine.current_name(), Some(names::STAGE_SELECT));
}
