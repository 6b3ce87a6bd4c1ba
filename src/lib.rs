//! connect_log2: a tile-merging puzzle for the terminal.
//!
//! The rules live in [`connect_log2_engine`]. This crate adds what a
//! player needs around them: configuration, the high-score table, the
//! save slot and a `ratatui` front-end.
//!
//! # Example
//!
//! ```no_run
//! use connect_log2::{AppConfig, Session, StartMode};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load(None)?;
//! let session = Session::start(&config, StartMode::Load, None)?;
//! connect_log2::run_tui(&config, session)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod hiscore;
mod savegame;
mod session;
mod tui;

pub use config::{AppConfig, DEFAULT_CONFIG_FILE};
pub use error::AppError;
pub use hiscore::{DATETIME_FORMAT, HiScoreTable, Score};
pub use savegame::SaveSlot;
pub use session::{Session, StartMode};
pub use tui::{
    App, Areas, BoardView, CELL_HEIGHT, CELL_WIDTH, Click, DOUBLE_CLICK_WINDOW, DRAG_HOLD,
    KeyAction, MouseClassifier, cell_at, key_action, layout, run_tui, tile_label,
};
