//! Flat position corpora: newline-delimited FEN files.

use std::fs;
use std::path::Path;

use shakmaty::fen::Fen;

use crate::error::CorpusError;

/// Load a newline-delimited FEN file. Unparseable lines are skipped.
pub fn load_positions(path: &Path) -> Result<Vec<String>, CorpusError> {
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_positions(&text))
}

pub fn parse_positions(text: &str) -> Vec<String> {
    let mut positions = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.parse::<Fen>().is_ok() {
            positions.push(line.to_string());
        } else {
            tracing::warn!(line, "skipping unparseable FEN line");
        }
    }
    positions
}
