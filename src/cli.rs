//! Command-line interface for connect_log2.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Connect neighbouring tiles of equal value and merge them into powers of two
#[derive(Parser, Debug)]
#[command(name = "connect_log2")]
#[command(about = "Tile-merging puzzle for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./connect_log2.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Resume the board saved with "save for later"
        #[arg(long)]
        load: bool,

        /// Seed the tile generator for a reproducible game
        #[arg(long)]
        seed: Option<u64>,

        /// Name recorded with high scores
        #[arg(long)]
        user: Option<String>,

        /// Directory for high scores, saves and the log
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the high-score table
    Scores,

    /// Delete the saved board
    ResetSave,
}
