use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub white: String,
    pub black: String,
    pub result: String, // "1-0", "0-1", "1/2-1/2", "*"
    pub event: Option<String>,
    pub date: Option<String>,
}

/// One game from a PGN corpus. `moves` is SAN, validated by replay at load
/// time, so every prefix applies cleanly from the standard starting position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub metadata: GameMetadata,
    pub moves: Vec<String>,
}

impl GameRecord {
    pub fn total_plies(&self) -> usize {
        self.moves.len()
    }
}
