//! Ground-truth answer computation by legal-move enumeration.
//!
//! Rejection (a position that would make a poor or unfair puzzle) is `None`;
//! the caller resamples. There is no user-facing error here.

use std::collections::HashMap;

use serde::Serialize;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, Move, Position};

use crate::question::{Metric, QuestionType};

/// Result of evaluating one question against a position: the count plus the
/// SAN of each qualifying move, in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub count: usize,
    pub moves: Vec<String>,
}

pub type AnswerSet = HashMap<QuestionType, Answer>;

/// Parse a FEN into a playable position. Derived positions are produced by
/// overriding the side to move, so they need not be reachable by normal play;
/// the impossible-check validation is waived for them.
fn position_from_fen(fen: &str) -> Option<Chess> {
    let fen: Fen = fen.parse().ok()?;
    match fen.into_position::<Chess>(CastlingMode::Standard) {
        Ok(pos) => Some(pos),
        Err(err) => err.ignore_impossible_check().ok(),
    }
}

/// Override the side-to-move field of a FEN. Purely textual. When the side
/// actually flips, the en-passant field is cleared: the ep target encodes the
/// other side's last move and cannot survive the flip.
pub fn with_side_to_move(fen: &str, side: Color) -> String {
    let mut parts: Vec<String> = fen.split_whitespace().map(String::from).collect();
    if parts.len() >= 2 {
        let tag = match side {
            Color::White => "w",
            Color::Black => "b",
        };
        if parts[1] != tag {
            parts[1] = tag.to_string();
            if parts.len() >= 4 {
                parts[3] = "-".to_string();
            }
        }
    }
    parts.join(" ")
}

/// SAN of every legal move that gives check. Each candidate is played on a
/// scratch copy so the probed position is never mutated.
pub fn checking_moves(pos: &Chess) -> Vec<String> {
    let mut checks = Vec::new();
    for mv in pos.legal_moves() {
        let mut scratch = pos.clone();
        scratch.play_unchecked(mv);
        if scratch.is_check() {
            checks.push(San::from_move(pos, mv).to_string());
        }
    }
    checks
}

fn is_capture(mv: &Move) -> bool {
    match mv {
        Move::Normal { capture: Some(_), .. } => true,
        Move::EnPassant { .. } => true,
        _ => false,
    }
}

/// SAN of every legal capture, en passant included.
pub fn capture_moves(pos: &Chess) -> Vec<String> {
    pos.legal_moves()
        .iter()
        .filter(|mv| is_capture(mv))
        .map(|mv| San::from_move(pos, *mv).to_string())
        .collect()
}

/// SAN of every legal move.
pub fn all_legal_moves(pos: &Chess) -> Vec<String> {
    pos.legal_moves()
        .iter()
        .map(|mv| San::from_move(pos, *mv).to_string())
        .collect()
}

/// Compute answers for every question, or reject the sample.
///
/// Rejected when: the FEN does not load; fewer than `ply_ahead` moves remain
/// to replay; the advanced position is already in check (checkmate included);
/// or a derived perspective position does not load.
pub fn evaluate(
    fen: &str,
    remaining: &[String],
    ply_ahead: usize,
    to_move: Color,
    questions: &[QuestionType],
) -> Option<AnswerSet> {
    let mut advanced = position_from_fen(fen)?;

    if ply_ahead > 0 {
        if remaining.len() < ply_ahead {
            return None;
        }
        for san_str in &remaining[..ply_ahead] {
            let san: San = san_str.parse().ok()?;
            let mv = san.to_move(&advanced).ok()?;
            advanced.play_unchecked(mv);
        }
    }

    // A position already in check (mate included) is not a fair counting
    // exercise.
    if advanced.is_check() {
        return None;
    }

    let advanced_fen = Fen::from_position(&advanced, shakmaty::EnPassantMode::Legal).to_string();

    let mut answers = AnswerSet::with_capacity(questions.len());
    for &question in questions {
        let side = question.color(to_move);
        let derived = position_from_fen(&with_side_to_move(&advanced_fen, side))?;
        let moves = match question.metric {
            Metric::Checks => checking_moves(&derived),
            Metric::Captures => capture_moves(&derived),
            Metric::AllLegal => all_legal_moves(&derived),
        };
        answers.insert(question, Answer { count: moves.len(), moves });
    }
    Some(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn q(label: &str) -> QuestionType {
        label.parse().unwrap()
    }

    #[test]
    fn test_start_position_counts() {
        let questions = [q("p1Checks"), q("p1Captures"), q("p1AllLegal")];
        let answers = evaluate(START_FEN, &[], 0, Color::White, &questions).unwrap();
        assert_eq!(answers[&q("p1Checks")].count, 0);
        assert_eq!(answers[&q("p1Captures")].count, 0);
        assert_eq!(answers[&q("p1AllLegal")].count, 20);
    }

    #[test]
    fn test_opponent_perspective_is_independent() {
        // Black has its own 20 openers even though the FEN says white to move.
        let questions = [q("p2AllLegal"), q("p2Checks")];
        let answers = evaluate(START_FEN, &[], 0, Color::White, &questions).unwrap();
        assert_eq!(answers[&q("p2AllLegal")].count, 20);
        assert_eq!(answers[&q("p2Checks")].count, 0);
    }

    #[test]
    fn test_rook_checks() {
        // Ra2 can check from a8 (back rank) and e2 (the king's file).
        let fen = "4k3/8/8/8/8/8/R7/4K3 w - - 0 1";
        let answers = evaluate(fen, &[], 0, Color::White, &[q("p1Checks"), q("p1AllLegal")]).unwrap();
        let checks = &answers[&q("p1Checks")];
        assert_eq!(checks.count, 2);
        assert!(checks.moves.contains(&"Ra8".to_string()));
        assert!(checks.moves.contains(&"Re2".to_string()));
        assert_eq!(answers[&q("p1AllLegal")].count, 19);
    }

    #[test]
    fn test_move_in_both_lists_when_check_and_capture() {
        // Qxb7 is the only capture and also a check; Qh8 is the other check.
        let fen = "k7/1p6/8/8/8/8/8/K6Q w - - 0 1";
        let answers = evaluate(fen, &[], 0, Color::White, &[q("p1Checks"), q("p1Captures"), q("p1AllLegal")]).unwrap();
        let checks = &answers[&q("p1Checks")];
        let captures = &answers[&q("p1Captures")];
        assert_eq!(captures.count, 1);
        assert_eq!(captures.moves, vec!["Qxb7".to_string()]);
        assert_eq!(checks.count, 2);
        assert!(checks.moves.contains(&"Qxb7".to_string()));
        assert!(checks.moves.contains(&"Qh8".to_string()));
        // Captures are a subset of the full legal list.
        let all = &answers[&q("p1AllLegal")];
        assert!(captures.moves.iter().all(|m| all.moves.contains(m)));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let questions = [q("p1Checks"), q("p2Captures")];
        let first = evaluate(START_FEN, &[], 0, Color::Black, &questions).unwrap();
        let second = evaluate(START_FEN, &[], 0, Color::Black, &questions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ply_ahead_advances_position() {
        let remaining: Vec<String> = ["e4", "e5"].iter().map(|s| s.to_string()).collect();
        let answers = evaluate(START_FEN, &remaining, 2, Color::White, &[q("p1AllLegal")]).unwrap();
        // After 1. e4 e5 white has 29 moves.
        assert_eq!(answers[&q("p1AllLegal")].count, 29);
    }

    #[test]
    fn test_ply_ahead_rejects_short_tail() {
        let remaining = vec!["e4".to_string()];
        assert!(evaluate(START_FEN, &remaining, 2, Color::White, &[q("p1Checks")]).is_none());
    }

    #[test]
    fn test_advanced_position_in_check_rejected() {
        let remaining: Vec<String> = ["e4", "e5", "Qh5", "Nc6", "Qxf7"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(evaluate(START_FEN, &remaining, 5, Color::White, &[q("p1Checks")]).is_none());
    }

    #[test]
    fn test_side_override_is_textual() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
        // No flip: untouched, ep square kept.
        assert_eq!(with_side_to_move(fen, Color::White), fen);
        // Flip: side replaced, ep cleared.
        let flipped = with_side_to_move(fen, Color::Black);
        let parts: Vec<&str> = flipped.split_whitespace().collect();
        assert_eq!(parts[1], "b");
        assert_eq!(parts[3], "-");
    }
}
