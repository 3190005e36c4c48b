//! Shared test helpers: a presenter that records calls, and generators for
//! replay-valid game corpora.

use chess_corpus::{GameMetadata, GameRecord};
use quiz_engine::{Presenter, QuestionType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shakmaty::san::San;
use shakmaty::{Chess, Position};

/// Presenter that records every call for later assertions.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingPresenter {
    pub positions: Vec<String>,
    pub look_aheads: Vec<Vec<String>>,
    pub feedback: Vec<(QuestionType, bool)>,
    pub scores: Vec<u32>,
    pub timers: Vec<Option<u32>>,
    pub expired_with: Vec<u32>,
}

impl Presenter for RecordingPresenter {
    fn show_position(&mut self, fen: &str, look_ahead: &[String]) {
        self.positions.push(fen.to_string());
        self.look_aheads.push(look_ahead.to_vec());
    }

    fn show_feedback(&mut self, question: QuestionType, correct: bool) {
        self.feedback.push((question, correct));
    }

    fn show_score(&mut self, score: u32) {
        self.scores.push(score);
    }

    fn show_timer(&mut self, seconds_remaining: Option<u32>) {
        self.timers.push(seconds_remaining);
    }

    fn session_expired(&mut self, final_score: u32) {
        self.expired_with.push(final_score);
    }
}

/// Build a replay-valid game by walking random legal moves until the target
/// length is reached; seeds are retried because random play can end early.
#[allow(dead_code)]
pub fn random_game(target_plies: usize) -> GameRecord {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pos = Chess::default();
        let mut moves = Vec::new();
        for _ in 0..target_plies {
            let legal = pos.legal_moves();
            let Some(mv) = legal.choose(&mut rng) else { break };
            let mv = mv.clone();
            moves.push(San::from_move(&pos, mv).to_string());
            pos.play_unchecked(mv);
        }
        if moves.len() == target_plies {
            return GameRecord {
                metadata: GameMetadata {
                    white: "White".into(),
                    black: "Black".into(),
                    result: "*".into(),
                    event: None,
                    date: None,
                },
                moves,
            };
        }
    }
    panic!("no random game reached {target_plies} plies");
}

/// Render a game as PGN movetext, e.g. `1. e4 e5 2. Nf3 *`.
#[allow(dead_code)]
pub fn to_pgn(game: &GameRecord) -> String {
    let mut out = format!(
        "[White \"{}\"]\n[Black \"{}\"]\n[Result \"{}\"]\n\n",
        game.metadata.white, game.metadata.black, game.metadata.result
    );
    for (i, san) in game.moves.iter().enumerate() {
        if i % 2 == 0 {
            out.push_str(&format!("{}. ", i / 2 + 1));
        }
        out.push_str(san);
        out.push(' ');
    }
    out.push('*');
    out
}
