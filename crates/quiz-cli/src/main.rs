//! Terminal front-end for the counting quiz.
//!
//! Reads answers line by line; the countdown advances by wall-clock seconds
//! elapsed between inputs, so the session stays single-threaded.

mod config;
mod display;

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use quiz_engine::{Phase, QuestionType, QuizSession, SessionConfig, Settings};
use quiz_engine::settings::FileStore;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::display::TerminalPresenter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = CliConfig::from_env()?;
    let corpus = config.load_corpus().context("no puzzle available")?;
    tracing::info!(entries = corpus.len(), "corpus loaded");

    let store = FileStore::open(&config.settings_path);
    let settings = Settings::load(&store);

    let presenter =
        TerminalPresenter::new(settings.player_to_move, settings.question_types.clone());
    let session_config = SessionConfig::from_settings(&settings);
    let mut session = QuizSession::new(corpus, session_config, presenter)?;

    session.start()?;
    run_loop(&mut session)
}

fn run_loop(session: &mut QuizSession<TerminalPresenter>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let questions: Vec<QuestionType> = session.config().question_types.clone();
    let mut last_input = Instant::now();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        // Catch the countdown up with the wall clock before scoring.
        let elapsed = last_input.elapsed().as_secs();
        last_input = Instant::now();
        for _ in 0..elapsed {
            session.tick();
            if session.phase() == Phase::Expired {
                break;
            }
        }

        if session.phase() == Phase::Expired {
            println!("Press enter to play again, q to quit.");
            let mut ack = String::new();
            if stdin.lock().read_line(&mut ack)? == 0 || ack.trim().eq_ignore_ascii_case("q") {
                break;
            }
            session.start()?;
            last_input = Instant::now();
            continue;
        }

        let values: Vec<u32> = line
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect();
        if values.len() != questions.len() {
            println!(
                "Enter {} numbers, in order: {}",
                questions.len(),
                session.presenter().prompt()
            );
            continue;
        }

        let inputs: HashMap<QuestionType, u32> =
            questions.iter().copied().zip(values).collect();
        session.submit_answers(&inputs)?;
    }

    println!("Final score: {}", session.score());
    Ok(())
}
