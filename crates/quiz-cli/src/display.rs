//! Terminal presenter: ASCII board, feedback marks, score and clock lines.

use quiz_engine::{Presenter, QuestionType};
use shakmaty::Color;

pub struct TerminalPresenter {
    /// Board orientation follows the resolved player, like flipping a
    /// physical board.
    player_to_move: Color,
    questions: Vec<QuestionType>,
}

impl TerminalPresenter {
    pub fn new(player_to_move: Color, questions: Vec<QuestionType>) -> Self {
        Self {
            player_to_move,
            questions,
        }
    }

    /// Prompt line listing the questions in answer order.
    pub fn prompt(&self) -> String {
        let labels: Vec<String> = self
            .questions
            .iter()
            .map(|q| q.label(self.player_to_move))
            .collect();
        labels.join(" | ")
    }
}

impl Presenter for TerminalPresenter {
    fn show_position(&mut self, fen: &str, look_ahead: &[String]) {
        println!();
        println!("{}", render_board(fen, self.player_to_move == Color::Black));
        if !look_ahead.is_empty() {
            println!("After: {}", look_ahead.join(" "));
        }
        println!("Count: {}", self.prompt());
    }

    fn show_feedback(&mut self, question: QuestionType, correct: bool) {
        let mark = if correct { '\u{2713}' } else { '\u{2717}' };
        println!("  {} {}", mark, question.label(self.player_to_move));
    }

    fn show_score(&mut self, score: u32) {
        println!("Score: {score}");
    }

    fn show_timer(&mut self, seconds_remaining: Option<u32>) {
        if let Some(seconds) = seconds_remaining {
            println!("Time: {:02}:{:02}", seconds / 60, seconds % 60);
        }
    }

    fn session_expired(&mut self, final_score: u32) {
        println!("Time's up! Final Score: {final_score}");
    }
}

/// Render the board field of a FEN as an 8x8 grid, rank labels on the left.
/// Flipping reverses both rank and file order, like turning the board.
fn render_board(fen: &str, flipped: bool) -> String {
    let board = fen.split_whitespace().next().unwrap_or("");
    let mut ranks: Vec<(usize, Vec<char>)> = board
        .split('/')
        .enumerate()
        .map(|(i, rank)| (8 - i, expand_rank(rank)))
        .collect();
    if flipped {
        ranks.reverse();
        for (_, squares) in &mut ranks {
            squares.reverse();
        }
    }

    let mut out = String::new();
    for (number, squares) in &ranks {
        let row: Vec<String> = squares.iter().map(|c| c.to_string()).collect();
        out.push_str(&format!("{number}  {}\n", row.join(" ")));
    }
    let files = if flipped {
        "   h g f e d c b a"
    } else {
        "   a b c d e f g h"
    };
    out.push_str(files);
    out
}

/// One FEN rank: digits become runs of dots.
fn expand_rank(rank: &str) -> Vec<char> {
    let mut squares = Vec::new();
    for c in rank.chars() {
        if let Some(n) = c.to_digit(10) {
            squares.extend(std::iter::repeat('.').take(n as usize));
        } else {
            squares.push(c);
        }
    }
    squares
}
