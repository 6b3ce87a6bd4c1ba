//! Pure game rules for connect-log2.
//!
//! Tiles carry exponents: a tile numbered `n` is worth `2^n`. The player
//! chains neighbouring tiles of equal value (optionally stepping up by one
//! after the first pair) and merges them into one tile numbered
//! `ceil(log2(sum))`. The board falls under gravity, refills from a spawn
//! range that follows the highest tile, and the game ends when no two
//! equal tiles touch.
//!
//! # Architecture
//!
//! - **Grid**: board model, gravity, refill, connection checks, snapshots
//! - **ChainBuilder**: marking rules for the pending chain
//! - **MoveResolver**: merge arithmetic and spawn-range adaptation
//! - **Game**: lifecycle state machine driven by [`Intent`]s
//! - **Invariants**: properties checked after every intent in debug builds
//!
//! The engine never draws and never touches the filesystem. Cell changes
//! are queued as [`PresentationEvent`]s; finished games are handed back as
//! [`GameOutcome`]s.
//!
//! # Example
//!
//! ```
//! use connect_log2_engine::{Game, GridDimensions, Intent, Direction};
//!
//! let mut game = Game::with_seed(GridDimensions::default(), 42);
//! game.apply(Intent::Navigate(Direction::Right));
//! let events = game.drain_events();
//! assert!(!events.is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chain;
mod error;
mod events;
mod game;
mod grid;
pub mod invariants;
mod position;
mod resolver;
mod tile;

pub use chain::{ChainBuilder, ChainChange, ChainSummary};
pub use error::EngineError;
pub use events::PresentationEvent;
pub use game::{FinalReport, Game, GameOutcome, GamePhase, Intent, assert_invariants};
pub use grid::{Grid, GridDimensions, GridSnapshot};
pub use position::{Direction, TilePos};
pub use resolver::{Merge, MoveResolver, merged_number, score};
pub use tile::{GridTile, TileRange};
