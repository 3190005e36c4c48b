//! End-to-end session scenarios over a flat position corpus.

mod common;

use std::collections::HashMap;

use chess_corpus::Corpus;
use common::RecordingPresenter;
use quiz_engine::{MemoryStore, Phase, QuestionType, QuizSession, SessionConfig, Settings};
use shakmaty::Color;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn q(label: &str) -> QuestionType {
    label.parse().unwrap()
}

fn session_over(
    fens: &[&str],
    config: SessionConfig,
) -> QuizSession<RecordingPresenter> {
    let corpus = Corpus::Positions(fens.iter().map(|s| s.to_string()).collect());
    let mut session =
        QuizSession::with_seed(corpus, config, RecordingPresenter::default(), 99).unwrap();
    session.start().unwrap();
    session
}

#[test]
fn single_entry_corpus_always_presents_that_position() {
    let config = SessionConfig {
        question_types: vec![q("p1Checks"), q("p1Captures")],
        player_to_move: Color::White,
        ..SessionConfig::default()
    };
    let mut session = session_over(&[START_FEN], config);

    assert_eq!(session.fen(), Some(START_FEN));
    assert_eq!(session.correct_answers()[&q("p1Checks")].count, 0);
    assert_eq!(session.correct_answers()[&q("p1Captures")].count, 0);

    // Answer correctly three rounds; every load is the same position.
    let inputs = HashMap::from([(q("p1Checks"), 0), (q("p1Captures"), 0)]);
    for _ in 0..3 {
        let outcome = session.submit_answers(&inputs).unwrap();
        assert!(outcome.advanced);
    }
    assert_eq!(session.score(), 6);
    assert!(session
        .presenter()
        .positions
        .iter()
        .all(|fen| fen == START_FEN));
}

#[test]
fn check_and_capture_lists_overlap_only_on_dual_moves() {
    // Qxb7 is both the only capture and one of two checks.
    let fen = "k7/1p6/8/8/8/8/8/K6Q w - - 0 1";
    let config = SessionConfig {
        question_types: vec![q("p1Checks"), q("p1Captures"), q("p1AllLegal")],
        player_to_move: Color::White,
        ..SessionConfig::default()
    };
    let session = session_over(&[fen], config);
    let answers = session.correct_answers();

    let checks = &answers[&q("p1Checks")];
    let captures = &answers[&q("p1Captures")];
    let all = &answers[&q("p1AllLegal")];

    assert_eq!(captures.count, 1);
    assert_eq!(checks.count, 2);
    assert!(checks.moves.contains(&"Qxb7".to_string()));
    assert!(captures.moves.contains(&"Qxb7".to_string()));
    // Captures are a subset of all legal moves.
    assert!(captures.moves.iter().all(|m| all.moves.contains(m)));
    assert_eq!(all.count, all.moves.len());
}

#[test]
fn timer_scenario_two_ticks_one_penalty() {
    let config = SessionConfig {
        question_types: vec![q("p1Checks")],
        player_to_move: Color::White,
        starting_seconds: 5,
        ..SessionConfig::default()
    };
    let mut session = session_over(&[START_FEN], config);

    session.tick(); // 4s
    let wrong = HashMap::from([(q("p1Checks"), 7)]);
    session.submit_answers(&wrong).unwrap(); // -10s, floored at 0
    session.tick(); // expires

    assert_eq!(session.phase(), Phase::Expired);
    assert_eq!(session.time_remaining(), Some(0));
    assert_eq!(session.presenter().expired_with, vec![0]);

    // Expired sessions take no answers until restarted.
    assert!(session.submit_answers(&wrong).is_err());
    session.start().unwrap();
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.score(), 0);
}

#[test]
fn settings_round_trip_drives_session_questions() {
    let mut store = MemoryStore::default();
    let saved = Settings {
        show_timer: true,
        player_to_move: Color::White,
        question_types: vec![q("p2AllLegal")],
        ply_ahead: 0,
    };
    saved.save(&mut store);

    let loaded = Settings::load(&store);
    assert_eq!(loaded.question_types, vec![q("p2AllLegal")]);
    // The one question is labeled with the opponent's color.
    assert_eq!(loaded.question_types[0].label(loaded.player_to_move), "Black legal moves");

    let config = SessionConfig::from_settings(&loaded);
    let session = session_over(&[START_FEN], config);
    // Black to move from the start position: 20 openers.
    assert_eq!(session.correct_answers()[&q("p2AllLegal")].count, 20);
}

#[test]
fn reconfigure_stops_old_countdown() {
    let config = SessionConfig {
        question_types: vec![q("p1Checks")],
        player_to_move: Color::White,
        starting_seconds: 2,
        ..SessionConfig::default()
    };
    let mut session = session_over(&[START_FEN], config.clone());
    session.tick(); // 1s left on the old run

    session.reconfigure(config).unwrap();
    // The fresh countdown starts from the top; the old one is gone.
    assert_eq!(session.time_remaining(), Some(2));
    session.tick();
    assert_eq!(session.phase(), Phase::Running);
}
