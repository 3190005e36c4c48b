//! Puzzle position sampling.
//!
//! Flat corpora are a uniform draw. Game corpora pick a random game and an
//! early-biased ply whose parity matches the desired side to move, then
//! replay up to it; the suffix that followed in the real game is kept for
//! look-ahead questions.

use chess_corpus::{Corpus, GameRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{Chess, Color, EnPassantMode, Position};

/// Tuning for game-corpus sampling.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Earliest ply index that may be presented.
    pub min_ply: usize,
    /// Plies that must remain after the sampled index, as look-ahead
    /// headroom.
    pub tail_margin: usize,
    /// Half-life, in ply pairs, of the exponential early-game bias.
    pub half_life: f64,
    /// Bounded retries before sampling reports failure.
    pub max_attempts: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            min_ply: 24,
            tail_margin: 11,
            half_life: 10.0,
            max_attempts: 20,
        }
    }
}

/// A sampled puzzle: the presented position plus the moves that actually
/// followed it in the source game.
#[derive(Debug, Clone)]
pub struct SampledPosition {
    pub fen: String,
    pub remaining: Vec<String>,
}

/// Draw one candidate puzzle. `None` means this draw was unusable (short
/// game, broken replay); the caller retries up to `max_attempts`.
pub fn sample(
    corpus: &Corpus,
    side: Color,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Option<SampledPosition> {
    match corpus {
        Corpus::Positions(positions) => sample_flat(positions, rng),
        Corpus::Games(games) => sample_game(games, side, config, rng),
    }
}

fn sample_flat(positions: &[String], rng: &mut impl Rng) -> Option<SampledPosition> {
    let fen = positions.choose(rng)?;
    Some(SampledPosition {
        fen: fen.clone(),
        remaining: Vec::new(),
    })
}

fn sample_game(
    games: &[GameRecord],
    side: Color,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Option<SampledPosition> {
    let game = games.choose(rng)?;
    let ply = choose_ply(game.total_plies(), side, config, rng)?;
    let (pos, remaining) = replay_to(game, ply)?;
    let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
    Some(SampledPosition { fen, remaining })
}

/// Ply index with parity matching `side` (even index = white to move),
/// biased toward the early game by an exponentially decaying offset.
fn choose_ply(
    total_plies: usize,
    side: Color,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Option<usize> {
    let parity = match side {
        Color::White => 0,
        Color::Black => 1,
    };
    let first = if config.min_ply % 2 == parity {
        config.min_ply
    } else {
        config.min_ply + 1
    };
    let max = total_plies.checked_sub(config.tail_margin)?;
    if first > max {
        return None;
    }

    let slots = (max - first) / 2;
    let lambda = std::f64::consts::LN_2 / config.half_life;
    let u: f64 = rng.gen();
    let offset = ((-(1.0 - u).ln()) / lambda).floor() as usize;
    Some(first + 2 * offset.min(slots))
}

/// Replay the first `ply` moves of a game; returns the reached position and
/// the SAN suffix that followed.
fn replay_to(game: &GameRecord, ply: usize) -> Option<(Chess, Vec<String>)> {
    let mut pos = Chess::default();
    for san_str in &game.moves[..ply] {
        let san: San = san_str.parse().ok()?;
        let mv = san.to_move(&pos).ok()?;
        pos.play_unchecked(mv);
    }
    Some((pos, game.moves[ply..].to_vec()))
}
