//! Corpus loading for the counting quiz: the flat FEN lists and PGN game
//! collections that puzzles are sampled from.

pub mod error;
pub mod fen_list;
pub mod game_record;
pub mod pgn;

use std::path::Path;

pub use error::CorpusError;
pub use game_record::{GameMetadata, GameRecord};

/// The backing collection puzzles are drawn from.
#[derive(Debug, Clone)]
pub enum Corpus {
    /// Standalone FEN snapshots, one puzzle candidate each.
    Positions(Vec<String>),
    /// Full games, replayed from the standard starting position.
    Games(Vec<GameRecord>),
}

impl Corpus {
    /// Load a newline-delimited FEN file.
    pub fn load_positions(path: &Path) -> Result<Self, CorpusError> {
        let positions = fen_list::load_positions(path)?;
        if positions.is_empty() {
            return Err(CorpusError::Empty);
        }
        tracing::info!(path = %path.display(), count = positions.len(), "loaded position corpus");
        Ok(Corpus::Positions(positions))
    }

    /// Load every game from a PGN file.
    pub fn load_games(path: &Path) -> Result<Self, CorpusError> {
        let games = pgn::load_games(path)?;
        if games.is_empty() {
            return Err(CorpusError::Empty);
        }
        tracing::info!(path = %path.display(), count = games.len(), "loaded game corpus");
        Ok(Corpus::Games(games))
    }

    /// Load all `*.pgn` files under a directory.
    pub fn load_games_dir(dir: &Path) -> Result<Self, CorpusError> {
        let games = pgn::load_games_dir(dir)?;
        if games.is_empty() {
            return Err(CorpusError::Empty);
        }
        tracing::info!(dir = %dir.display(), count = games.len(), "loaded game corpus");
        Ok(Corpus::Games(games))
    }

    pub fn len(&self) -> usize {
        match self {
            Corpus::Positions(positions) => positions.len(),
            Corpus::Games(games) => games.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
