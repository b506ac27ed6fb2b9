#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Word Slasher match.

mod session;
mod simulation;
mod typist;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use word_slasher_core::WELCOME_BANNER;
use word_slasher_system_spawning::Spawning;
use word_slasher_world::MatchEngine;

use crate::{session::SessionFile, simulation::Simulation, typist::Typist};

/// Headless Word Slasher match driven by a simulated typist.
#[derive(Parser, Debug)]
#[command(name = "word-slasher")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML session file with optional [match] and [spawning] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed overriding every seed in the session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated seconds to play before stopping
    #[arg(short, long, default_value_t = 60.0)]
    duration: f64,

    /// Length of a single simulation step in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Keystrokes per second the typist manages
    #[arg(long, default_value_t = 5.0)]
    typing_speed: f64,

    /// Probability that a keystroke is a typo
    #[arg(long, default_value_t = 0.05)]
    typo_rate: f64,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("--tick-ms must be greater than zero");
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            bail!("--duration must be a non-negative number of seconds");
        }
        if !self.typing_speed.is_finite() || self.typing_speed < 0.0 {
            bail!("--typing-speed must be a non-negative number");
        }
        if !(0.0..=1.0).contains(&self.typo_rate) {
            bail!("--typo-rate must lie within 0.0..=1.0");
        }
        Ok(())
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Entry point for the Word Slasher command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    args.validate()?;

    let mut session = match &args.config {
        Some(path) => SessionFile::load(path)?,
        None => SessionFile::default(),
    };
    if let Some(seed) = args.seed {
        session.reseed(seed);
    }

    let seed = session.match_config.seed;
    let spawning = Spawning::new(session.spawning.to_config(seed)?);
    let engine = MatchEngine::new(session.match_config).context("invalid [match] table")?;
    let typist = Typist::new(args.typing_speed, args.typo_rate, seed);

    println!("{WELCOME_BANNER}");
    info!(
        seed,
        duration = args.duration,
        typing_speed = args.typing_speed,
        "starting match"
    );

    let duration =
        Duration::try_from_secs_f64(args.duration).context("--duration is out of range")?;
    let mut simulation = Simulation::new(engine, spawning, typist);
    let summary = simulation.run(duration, Duration::from_millis(args.tick_ms));

    let outcome = if summary.game_over {
        "objective destroyed"
    } else {
        "objective held"
    };
    println!("{outcome} after {:.1}s", summary.elapsed.as_secs_f64());
    println!("score:    {}", summary.score);
    println!("health:   {}/{}", summary.health, summary.max_health);
    println!(
        "enemies:  {} spawned, {} defeated, {} escaped",
        summary.spawned, summary.defeated, summary.escaped
    );
    println!(
        "accuracy: {}% of {} keystrokes",
        summary.accuracy_percent(),
        summary.keystrokes
    );

    Ok(())
}
