//! Question types: a perspective tag plus a counting metric.
//!
//! Storage and the UI use compact labels (`"p1Checks"`, `"p2AllLegal"`);
//! everything past the parse boundary works with the typed pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shakmaty::Color;

/// Whose move space a question asks about, relative to the session's
/// resolved side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perspective {
    /// The side to move in the presented puzzle.
    ToMove,
    /// The opposing side.
    Opponent,
}

/// What gets counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Checks,
    Captures,
    AllLegal,
}

/// One quiz question: count `metric` moves for `perspective`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionType {
    pub perspective: Perspective,
    pub metric: Metric,
}

impl QuestionType {
    pub const fn new(perspective: Perspective, metric: Metric) -> Self {
        Self { perspective, metric }
    }

    /// The original four-question set: checks and captures for both sides.
    pub fn default_set() -> Vec<QuestionType> {
        vec![
            QuestionType::new(Perspective::ToMove, Metric::Checks),
            QuestionType::new(Perspective::ToMove, Metric::Captures),
            QuestionType::new(Perspective::Opponent, Metric::Checks),
            QuestionType::new(Perspective::Opponent, Metric::Captures),
        ]
    }

    /// The color this question resolves to once the side to move is known.
    pub fn color(&self, player_to_move: Color) -> Color {
        match self.perspective {
            Perspective::ToMove => player_to_move,
            Perspective::Opponent => !player_to_move,
        }
    }

    /// UI label, e.g. "White checks" when white is the resolved side to move.
    pub fn label(&self, player_to_move: Color) -> String {
        let color = match self.color(player_to_move) {
            Color::White => "White",
            Color::Black => "Black",
        };
        let metric = match self.metric {
            Metric::Checks => "checks",
            Metric::Captures => "captures",
            Metric::AllLegal => "legal moves",
        };
        format!("{color} {metric}")
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized question type: {0}")]
pub struct ParseQuestionTypeError(pub String);

impl FromStr for QuestionType {
    type Err = ParseQuestionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (perspective, metric) = if let Some(rest) = s.strip_prefix("p1") {
            (Perspective::ToMove, rest)
        } else if let Some(rest) = s.strip_prefix("p2") {
            (Perspective::Opponent, rest)
        } else {
            return Err(ParseQuestionTypeError(s.to_string()));
        };
        let metric = match metric {
            "Checks" => Metric::Checks,
            "Captures" => Metric::Captures,
            "AllLegal" => Metric::AllLegal,
            _ => return Err(ParseQuestionTypeError(s.to_string())),
        };
        Ok(QuestionType::new(perspective, metric))
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let perspective = match self.perspective {
            Perspective::ToMove => "p1",
            Perspective::Opponent => "p2",
        };
        let metric = match self.metric {
            Metric::Checks => "Checks",
            Metric::Captures => "Captures",
            Metric::AllLegal => "AllLegal",
        };
        write!(f, "{perspective}{metric}")
    }
}

impl TryFrom<String> for QuestionType {
    type Error = ParseQuestionTypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<QuestionType> for String {
    fn from(q: QuestionType) -> Self {
        q.to_string()
    }
}
