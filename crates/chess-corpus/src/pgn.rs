//! PGN corpus parsing built on pgn-reader's streaming visitor.
//!
//! Movetext is replay-validated against shakmaty while parsing: a SAN that
//! does not apply truncates the game at the last clean ply, and games with no
//! replayable moves at all are skipped.

use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::ControlFlow;
use std::path::Path;

use pgn_reader::{RawTag, Reader, SanPlus, Visitor};
use shakmaty::{Chess, Position};

use crate::error::CorpusError;
use crate::game_record::{GameMetadata, GameRecord};

/// Tags collected during header parsing.
struct GameTags {
    white: String,
    black: String,
    result: String,
    event: Option<String>,
    date: Option<String>,
}

impl Default for GameTags {
    fn default() -> Self {
        Self {
            white: "Unknown".to_string(),
            black: "Unknown".to_string(),
            result: "*".to_string(),
            event: None,
            date: None,
        }
    }
}

/// State during movetext parsing.
struct GameState {
    metadata: GameMetadata,
    board: Chess,
    moves: Vec<String>,
    truncated: bool,
}

/// Visitor that collects games with replay-validated movetext.
struct GameCollector;

impl Visitor for GameCollector {
    type Tags = GameTags;
    type Movetext = GameState;
    type Output = Option<GameRecord>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, GameTags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(&mut self, tags: &mut GameTags, name: &[u8], value: RawTag<'_>) -> ControlFlow<Self::Output> {
        let value = value.decode_utf8_lossy();
        match name {
            b"White" => tags.white = value.into_owned(),
            b"Black" => tags.black = value.into_owned(),
            b"Result" => tags.result = value.into_owned(),
            b"Event" => tags.event = Some(value.into_owned()),
            b"Date" => tags.date = Some(value.into_owned()),
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameTags) -> ControlFlow<Self::Output, GameState> {
        ControlFlow::Continue(GameState {
            metadata: GameMetadata {
                white: tags.white,
                black: tags.black,
                result: tags.result,
                event: tags.event,
                date: tags.date,
            },
            board: Chess::default(),
            moves: Vec::new(),
            truncated: false,
        })
    }

    fn san(&mut self, state: &mut GameState, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        if state.truncated {
            return ControlFlow::Continue(());
        }
        match san_plus.san.to_move(&state.board) {
            Ok(mv) => {
                state.moves.push(san_plus.san.to_string());
                state.board.play_unchecked(mv);
            }
            // Keep the prefix that replays cleanly.
            Err(_) => state.truncated = true,
        }
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, state: GameState) -> Self::Output {
        if state.moves.is_empty() {
            return None;
        }
        Some(GameRecord {
            metadata: state.metadata,
            moves: state.moves,
        })
    }
}

/// Parse every game from a PGN stream.
pub fn read_games<R: Read>(input: R, origin: &str) -> Result<Vec<GameRecord>, CorpusError> {
    let mut reader = Reader::new(input);
    let mut collector = GameCollector;
    let mut games = Vec::new();
    let mut skipped = 0usize;

    loop {
        match reader.read_game(&mut collector) {
            Ok(Some(Some(game))) => games.push(game),
            Ok(Some(None)) => skipped += 1,
            Ok(None) => break,
            Err(source) => {
                return Err(CorpusError::Io {
                    path: origin.to_string(),
                    source,
                })
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(origin, skipped, "skipped games with no replayable moves");
    }

    Ok(games)
}

/// Parse every game in a PGN file.
pub fn load_games(path: &Path) -> Result<Vec<GameRecord>, CorpusError> {
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_games(BufReader::new(file), &path.display().to_string())
}

/// Load all `*.pgn` files under a directory into one list.
pub fn load_games_dir(dir: &Path) -> Result<Vec<GameRecord>, CorpusError> {
    let pattern = format!("{}/*.pgn", dir.display());
    let paths = glob::glob(&pattern).map_err(|e| CorpusError::Pattern(e.to_string()))?;

    let mut games = Vec::new();
    for path in paths.filter_map(|p| p.ok()) {
        games.extend(load_games(&path)?);
    }
    Ok(games)
}
