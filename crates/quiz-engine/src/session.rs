//! Quiz session state machine: puzzle load, scoring, countdown.
//!
//! The session owns all mutable quiz state and drives display through the
//! narrow [`Presenter`] seam, so the sampling and answer logic stay pure and
//! testable. Events (ticks, submissions) are ordinary method calls that run
//! to completion; there is no interior concurrency.

use std::collections::HashMap;

use chess_corpus::{Corpus, CorpusError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::Color;
use tracing::debug;

use crate::engine::{self, AnswerSet};
use crate::error::QuizError;
use crate::question::QuestionType;
use crate::sampler::{self, SamplerConfig};
use crate::settings::Settings;

/// Display-side effects. Implementations render to whatever surface hosts
/// the quiz; tests record the calls.
pub trait Presenter {
    /// A new puzzle: show the position (and the moves to visualize ahead,
    /// when look-ahead is on) with inputs and feedback cleared.
    fn show_position(&mut self, fen: &str, look_ahead: &[String]);
    fn show_feedback(&mut self, question: QuestionType, correct: bool);
    fn show_score(&mut self, score: u32);
    /// `None` means the timer is disabled.
    fn show_timer(&mut self, seconds_remaining: Option<u32>);
    /// The countdown hit zero. Fires exactly once per run.
    fn session_expired(&mut self, final_score: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Expired,
}

/// Per-session configuration, resolved from [`Settings`] at start and fixed
/// until the next reconfigure.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub question_types: Vec<QuestionType>,
    /// The side "p1" questions resolve to; also biases game sampling.
    pub player_to_move: Color,
    pub timer_enabled: bool,
    pub starting_seconds: u32,
    pub penalty_seconds: u32,
    pub ply_ahead: usize,
    pub sampler: SamplerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            question_types: QuestionType::default_set(),
            player_to_move: Color::Black,
            timer_enabled: true,
            starting_seconds: 180,
            penalty_seconds: 10,
            ply_ahead: 0,
            sampler: SamplerConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            question_types: settings.question_types.clone(),
            player_to_move: settings.player_to_move,
            timer_enabled: settings.show_timer,
            ply_ahead: settings.ply_ahead,
            ..Self::default()
        }
    }
}

/// Per-question outcome of one submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub results: Vec<(QuestionType, bool)>,
    /// Every question has now been answered correctly; the next puzzle was
    /// loaded.
    pub advanced: bool,
}

pub struct QuizSession<P: Presenter> {
    corpus: Corpus,
    config: SessionConfig,
    presenter: P,
    rng: StdRng,
    phase: Phase,
    fen: Option<String>,
    look_ahead: Vec<String>,
    correct: AnswerSet,
    answered: HashMap<QuestionType, bool>,
    score: u32,
    time_remaining: Option<u32>,
}

impl<P: Presenter> QuizSession<P> {
    /// A session can only exist over a loaded, non-empty corpus.
    pub fn new(corpus: Corpus, config: SessionConfig, presenter: P) -> Result<Self, QuizError> {
        Self::with_rng(corpus, config, presenter, StdRng::from_entropy())
    }

    /// Deterministic sampling for tests.
    pub fn with_seed(
        corpus: Corpus,
        config: SessionConfig,
        presenter: P,
        seed: u64,
    ) -> Result<Self, QuizError> {
        Self::with_rng(corpus, config, presenter, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        corpus: Corpus,
        config: SessionConfig,
        presenter: P,
        rng: StdRng,
    ) -> Result<Self, QuizError> {
        if corpus.is_empty() {
            return Err(CorpusError::Empty.into());
        }
        Ok(Self {
            corpus,
            config,
            presenter,
            rng,
            phase: Phase::Idle,
            fen: None,
            look_ahead: Vec::new(),
            correct: AnswerSet::new(),
            answered: HashMap::new(),
            score: 0,
            time_remaining: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn fen(&self) -> Option<&str> {
        self.fen.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Ground truth for the current puzzle, for reveal-style displays.
    pub fn correct_answers(&self) -> &AnswerSet {
        &self.correct
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Reset the score and start a fresh run on a new puzzle.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.score = 0;
        self.presenter.show_score(0);
        self.load_puzzle()?;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Apply new settings and immediately start a new session. Any running
    /// countdown is dropped first so it cannot fire into the fresh run.
    pub fn reconfigure(&mut self, config: SessionConfig) -> Result<(), QuizError> {
        self.phase = Phase::Idle;
        self.config = config;
        self.start()
    }

    /// Game corpora support look-ahead; a bare FEN has no move tail to
    /// replay.
    fn effective_ply_ahead(&self) -> usize {
        match self.corpus {
            Corpus::Positions(_) => 0,
            Corpus::Games(_) => self.config.ply_ahead,
        }
    }

    /// Sample, evaluate, and present the next puzzle. Sampler misses and
    /// rejected evaluations both consume one of the bounded attempts.
    pub fn load_puzzle(&mut self) -> Result<(), QuizError> {
        let max_attempts = self.config.sampler.max_attempts;
        let ply_ahead = self.effective_ply_ahead();

        for _ in 0..max_attempts {
            let Some(sampled) = sampler::sample(
                &self.corpus,
                self.config.player_to_move,
                &self.config.sampler,
                &mut self.rng,
            ) else {
                continue;
            };

            let Some(answers) = engine::evaluate(
                &sampled.fen,
                &sampled.remaining,
                ply_ahead,
                self.config.player_to_move,
                &self.config.question_types,
            ) else {
                debug!(fen = %sampled.fen, "rejected sampled position");
                continue;
            };

            self.look_ahead = sampled.remaining[..ply_ahead].to_vec();
            self.correct = answers;
            self.answered = self
                .config
                .question_types
                .iter()
                .map(|&q| (q, false))
                .collect();
            self.reset_timer();
            self.presenter.show_position(&sampled.fen, &self.look_ahead);
            self.fen = Some(sampled.fen);
            return Ok(());
        }

        Err(QuizError::SampleExhausted(max_attempts))
    }

    /// Score one round of answers. The first correct answer per question
    /// scores a point; wrong answers cost time; once every question has been
    /// answered correctly the session advances to the next puzzle.
    pub fn submit_answers(
        &mut self,
        inputs: &HashMap<QuestionType, u32>,
    ) -> Result<SubmitOutcome, QuizError> {
        if self.phase != Phase::Running {
            return Err(QuizError::NotRunning);
        }

        let questions = self.config.question_types.clone();
        let mut results = Vec::with_capacity(questions.len());

        for question in questions {
            let expected = self.correct.get(&question).map_or(0, |a| a.count);
            let correct = inputs
                .get(&question)
                .is_some_and(|&given| given as usize == expected);

            self.presenter.show_feedback(question, correct);

            if correct {
                let first_time = !self.answered.get(&question).copied().unwrap_or(false);
                if first_time {
                    self.answered.insert(question, true);
                    self.score += 1;
                    self.presenter.show_score(self.score);
                }
            } else {
                self.penalize();
            }
            results.push((question, correct));
        }

        let advanced = self.answered.values().all(|&done| done);
        if advanced {
            self.load_puzzle()?;
        }

        Ok(SubmitOutcome { results, advanced })
    }

    /// One second of countdown. Inert unless the session is running with
    /// the timer enabled, so a stale driver cannot fire into a fresh run.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(remaining) = self.time_remaining else {
            return;
        };
        let remaining = remaining.saturating_sub(1);
        self.time_remaining = Some(remaining);
        self.presenter.show_timer(Some(remaining));
        if remaining == 0 {
            self.phase = Phase::Expired;
            self.presenter.session_expired(self.score);
        }
    }

    fn reset_timer(&mut self) {
        self.time_remaining = self
            .config
            .timer_enabled
            .then_some(self.config.starting_seconds);
        self.presenter.show_timer(self.time_remaining);
    }

    /// Wrong answers cost time, floored at zero. Expiry stays the tick's
    /// job: the penalty may empty the clock but never ends the run itself.
    fn penalize(&mut self) {
        let Some(remaining) = self.time_remaining else {
            return;
        };
        self.time_remaining = Some(remaining.saturating_sub(self.config.penalty_seconds));
        self.presenter.show_timer(self.time_remaining);
    }
}
