//! User preferences, round-tripped through a string key-value store.
//!
//! Missing or unparseable entries fall back to defaults with a warning;
//! settings problems never take the quiz down.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use shakmaty::Color;
use tracing::warn;

use crate::question::QuestionType;

const SHOW_TIMER_KEY: &str = "showTimer";
const PLAYER_TO_MOVE_KEY: &str = "playerToMove";
const QUESTION_TYPES_KEY: &str = "questionTypes";
const PLY_AHEAD_KEY: &str = "plyAhead";

/// Durable string key-value storage for preferences.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Volatile store for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

/// Store backed by a JSON map on disk, written through on every set.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    /// Open a store file. A missing or unreadable file starts empty.
    pub fn open(path: &Path) -> Self {
        let values = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring corrupt settings file");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string_pretty(&self.values) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize settings");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), error = %e, "failed to write settings");
        }
    }
}

impl PrefStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// User configuration: timer, side to move, active questions, look-ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub show_timer: bool,
    pub player_to_move: Color,
    pub question_types: Vec<QuestionType>,
    pub ply_ahead: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_timer: true,
            player_to_move: Color::Black,
            question_types: QuestionType::default_set(),
            ply_ahead: 0,
        }
    }
}

impl Settings {
    /// Load from the store, falling back per key to defaults.
    pub fn load(store: &impl PrefStore) -> Self {
        let defaults = Self::default();

        let show_timer = store
            .get(SHOW_TIMER_KEY)
            .map(|v| v != "false")
            .unwrap_or(defaults.show_timer);

        let player_to_move = match store.get(PLAYER_TO_MOVE_KEY).as_deref() {
            Some("white") => Color::White,
            Some("black") => Color::Black,
            Some(other) => {
                warn!(value = other, "unrecognized playerToMove, using default");
                defaults.player_to_move
            }
            None => defaults.player_to_move,
        };

        let question_types = store
            .get(QUESTION_TYPES_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<QuestionType>>(&raw) {
                Ok(types) => Some(types),
                Err(e) => {
                    warn!(error = %e, "unrecognized questionTypes, using default");
                    None
                }
            })
            .filter(|types| !types.is_empty())
            .unwrap_or(defaults.question_types);

        let ply_ahead = store
            .get(PLY_AHEAD_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.ply_ahead);

        Self {
            show_timer,
            player_to_move,
            question_types,
            ply_ahead,
        }
    }

    pub fn save(&self, store: &mut impl PrefStore) {
        store.set(SHOW_TIMER_KEY, if self.show_timer { "true" } else { "false" });
        store.set(
            PLAYER_TO_MOVE_KEY,
            match self.player_to_move {
                Color::White => "white",
                Color::Black => "black",
            },
        );
        let types = serde_json::to_string(&self.question_types)
            .unwrap_or_else(|_| "[]".to_string());
        store.set(QUESTION_TYPES_KEY, &types);
        store.set(PLY_AHEAD_KEY, &self.ply_ahead.to_string());
    }
}
