//! connect_log2 binary.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use connect_log2::{AppConfig, HiScoreTable, SaveSlot, Session, StartMode, run_tui};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            load,
            seed,
            user,
            data_dir,
        } => run_play(config, load, seed, user, data_dir),
        Command::Scores => {
            initialize_tracing();
            print_scores(&config);
            Ok(())
        }
        Command::ResetSave => {
            initialize_tracing();
            reset_save(&config)
        }
    }
}

/// Play one session in the terminal.
fn run_play(
    mut config: AppConfig,
    load: bool,
    seed: Option<u64>,
    user: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(user) = user {
        config = config.with_user(user);
    }
    if let Some(data_dir) = data_dir {
        config = config.with_data_dir(data_dir);
    }
    let mode = if load { StartMode::Load } else { StartMode::New };
    let session = Session::start(&config, mode, seed)?;
    run_tui(&config, session)
}

#[instrument(skip(config))]
fn print_scores(config: &AppConfig) {
    let table = HiScoreTable::load(config.hiscore_path());
    if table.is_empty() {
        println!("No high scores yet");
        return;
    }
    println!("High scores, top {}", HiScoreTable::MAX_SCORES);
    for (i, score) in table.scores().iter().enumerate() {
        println!(
            "{:2} - score: {:>15}, tile: {:2}, time: {}, user: {}",
            i + 1,
            score.points(),
            score.tile(),
            score.datetime(),
            score.user()
        );
    }
    println!("Times are UTC");
}

#[instrument(skip(config))]
fn reset_save(config: &AppConfig) -> Result<()> {
    let slot = SaveSlot::new(config.save_path());
    if slot.exists() {
        slot.remove()?;
        info!(path = %slot.path().display(), "Saved game removed");
        println!("Saved game removed");
    } else {
        println!("No saved game");
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
