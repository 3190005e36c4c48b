//! Corpus error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid corpus glob pattern: {0}")]
    Pattern(String),

    #[error("corpus is empty")]
    Empty,
}
