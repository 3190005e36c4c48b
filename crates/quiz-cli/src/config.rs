//! CLI configuration from environment variables

use std::env;
use std::path::PathBuf;

use chess_corpus::{Corpus, CorpusError};

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Flat FEN corpus file, one position per line.
    pub positions_path: Option<PathBuf>,
    /// PGN corpus: a file, or a directory of `*.pgn` files.
    pub games_path: Option<PathBuf>,
    /// Where preferences live between runs.
    pub settings_path: PathBuf,
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let positions_path = env::var("QUIZ_POSITIONS").ok().map(PathBuf::from);
        let games_path = env::var("QUIZ_GAMES").ok().map(PathBuf::from);
        if positions_path.is_none() && games_path.is_none() {
            anyhow::bail!("set QUIZ_POSITIONS (FEN list) or QUIZ_GAMES (PGN file or directory)");
        }

        let settings_path = env::var("QUIZ_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("count-quiz-settings.json"));

        Ok(Self {
            positions_path,
            games_path,
            settings_path,
        })
    }

    /// Games take precedence when both sources are configured.
    pub fn load_corpus(&self) -> Result<Corpus, CorpusError> {
        if let Some(path) = &self.games_path {
            if path.is_dir() {
                Corpus::load_games_dir(path)
            } else {
                Corpus::load_games(path)
            }
        } else if let Some(path) = &self.positions_path {
            Corpus::load_positions(path)
        } else {
            Err(CorpusError::Empty)
        }
    }
}
