//! Counting-quiz engine.
//!
//! Samples a fair position from a corpus, computes ground-truth counts
//! (checks, captures, all legal moves) for each configured perspective by
//! legal-move enumeration, and runs a scored, timed session. Display is
//! behind the [`session::Presenter`] seam; chess rules come from shakmaty.

pub mod engine;
pub mod error;
pub mod question;
pub mod sampler;
pub mod session;
pub mod settings;

pub use engine::{Answer, AnswerSet};
pub use error::QuizError;
pub use question::{Metric, Perspective, QuestionType};
pub use sampler::{SampledPosition, SamplerConfig};
pub use session::{Phase, Presenter, QuizSession, SessionConfig, SubmitOutcome};
pub use settings::{FileStore, MemoryStore, PrefStore, Settings};
