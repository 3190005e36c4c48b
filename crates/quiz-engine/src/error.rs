//! Engine error types

use thiserror::Error;

use crate::question::ParseQuestionTypeError;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("corpus error: {0}")]
    Corpus(#[from] chess_corpus::CorpusError),

    #[error("no valid puzzle found after {0} attempts")]
    SampleExhausted(u32),

    #[error(transparent)]
    QuestionType(#[from] ParseQuestionTypeError),

    #[error("no active session")]
    NotRunning,
}
