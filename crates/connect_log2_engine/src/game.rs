//! One game session: the board, the pending chain and the lifecycle.
//!
//! Input arrives as [`Intent`]s. The session is an explicit state machine
//! over [`GamePhase`]; every intent is either handled in the current phase
//! or ignored, and may finish the session with a [`GameOutcome`].

use crate::chain::{ChainBuilder, ChainChange, ChainSummary};
use crate::error::EngineError;
use crate::events::PresentationEvent;
use crate::grid::{Grid, GridDimensions, GridSnapshot};
use crate::invariants::{GameInvariants, InvariantSet};
use crate::position::{Direction, TilePos};
use crate::resolver::{Merge, MoveResolver, score};
use crate::tile::TileRange;
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Where the session is in its lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum GamePhase {
    /// Marking and committing chains.
    #[default]
    Playing,
    /// No connection remains; quit or start the next game.
    AwaitingNoMovesDecision,
    /// Quit requested; quit, save for later, or continue.
    AwaitingQuitConfirmation,
    /// New game requested; confirm or continue.
    AwaitingResetConfirmation,
}

/// A classified player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Toggle a mark at the position.
    StartOrExtend(TilePos),
    /// Mark at the position without unmarking.
    ExtendOnly(TilePos),
    /// Continuous drag over the position.
    DragExtend(TilePos),
    /// Drop the pending chain.
    Cancel,
    /// Merge the pending chain.
    Commit,
    /// Move the cursor one cell.
    Navigate(Direction),
    /// Put the cursor on a cell.
    SetCursor(TilePos),
    /// Ask to end the session.
    RequestQuit,
    /// Ask for a new game (also "next game" once no moves remain).
    RequestReset,
    /// Accept the pending question (quit, or start over).
    Confirm,
    /// Leave now and keep the board for later.
    SaveAndQuit,
    /// Dismiss the pending question.
    Resume,
}

/// Result of a finished game, handed to the high-score store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct FinalReport {
    /// Sum of the real values on the board.
    points: u128,
    /// Highest tile number on the board.
    highest_tile: u8,
}

impl FinalReport {
    /// Creates a report.
    pub fn new(points: u128, highest_tile: u8) -> Self {
        Self {
            points,
            highest_tile,
        }
    }
}

/// What an intent did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// Nothing beyond the queued presentation events.
    Continue,
    /// A chain was merged.
    Merged(Merge),
    /// A new board replaced the old one; the old board's result is reported.
    Restarted(FinalReport),
    /// The session is over and its result should be recorded.
    Ended(FinalReport),
    /// The session is over and the board should be stored for later.
    Saved(GridSnapshot),
}

impl GameOutcome {
    /// Returns true if the session is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameOutcome::Ended(_) | GameOutcome::Saved(_))
    }
}

/// A running game session.
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) grid: Grid,
    pub(crate) chain: ChainBuilder,
    pub(crate) resolver: MoveResolver,
    rng: StdRng,
    phase: GamePhase,
    cursor: TilePos,
    events: Vec<PresentationEvent>,
}

impl Game {
    /// Starts a new game seeded from the operating system.
    #[instrument]
    pub fn new(dimensions: GridDimensions) -> Self {
        Self::with_rng(dimensions, StdRng::from_os_rng())
    }

    /// Starts a new game with a fixed seed.
    #[instrument]
    pub fn with_seed(dimensions: GridDimensions, seed: u64) -> Self {
        Self::with_rng(dimensions, StdRng::seed_from_u64(seed))
    }

    /// Starts a new game drawing tiles from `rng`.
    pub fn with_rng(dimensions: GridDimensions, rng: StdRng) -> Self {
        let mut game = Self::blank(Grid::new(dimensions), rng);
        game.start();
        game
    }

    /// Resumes a saved board.
    ///
    /// Any empty cell in the snapshot is refilled and the spawn range is
    /// derived from the highest tile, as for a fresh start.
    #[instrument(skip(snapshot, rng))]
    pub fn from_snapshot(
        dimensions: GridDimensions,
        snapshot: &GridSnapshot,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        let mut grid = Grid::new(dimensions);
        grid.load_snapshot(snapshot)?;
        let mut game = Self::blank(grid, rng);
        game.start();
        info!("Resumed saved game");
        Ok(game)
    }

    fn blank(grid: Grid, rng: StdRng) -> Self {
        Self {
            grid,
            chain: ChainBuilder::new(),
            resolver: MoveResolver::new(),
            rng,
            phase: GamePhase::Playing,
            cursor: TilePos::default(),
            events: Vec::new(),
        }
    }

    fn start(&mut self) {
        self.grid.refill(self.resolver.range(), &mut self.rng);
        self.resolver.handle_highest_number(&mut self.grid, &mut self.rng);
        self.pump_grid_events();
        self.events.push(PresentationEvent::RangeChanged(self.resolver.range()));
        self.events.push(PresentationEvent::Highlight {
            pos: self.cursor,
            on: true,
        });
        self.push_score();
        self.refresh_phase();
    }

    /// Board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Pending chain.
    pub fn chain(&self) -> &ChainBuilder {
        &self.chain
    }

    /// Running total of the pending chain, if any.
    pub fn chain_summary(&self) -> Option<ChainSummary> {
        self.chain.summary(&self.grid)
    }

    /// Current spawn range.
    pub fn range(&self) -> TileRange {
        self.resolver.range()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> TilePos {
        self.cursor
    }

    /// Sum of the real values on the board.
    pub fn score(&self) -> u128 {
        score(&self.grid)
    }

    /// Highest tile number on the board.
    pub fn highest_number(&self) -> u8 {
        self.grid.get_highest_number()
    }

    /// Result of the board as it stands.
    pub fn report(&self) -> FinalReport {
        FinalReport::new(self.score(), self.highest_number())
    }

    /// Board as a save-game payload.
    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    /// Takes the queued presentation events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Applies one intent.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn apply(&mut self, intent: Intent) -> GameOutcome {
        let outcome = match self.phase {
            GamePhase::Playing => self.play(intent),
            GamePhase::AwaitingQuitConfirmation => match intent {
                Intent::Confirm => self.end(),
                Intent::SaveAndQuit => {
                    info!("Saving game for later");
                    GameOutcome::Saved(self.snapshot())
                }
                Intent::Resume => self.resume(),
                _ => GameOutcome::Continue,
            },
            GamePhase::AwaitingResetConfirmation => match intent {
                Intent::Confirm => self.restart(),
                Intent::Resume => self.resume(),
                _ => GameOutcome::Continue,
            },
            GamePhase::AwaitingNoMovesDecision => match intent {
                Intent::Confirm => self.end(),
                Intent::RequestReset => self.restart(),
                Intent::Resume => self.resume(),
                _ => GameOutcome::Continue,
            },
        };
        self.refresh_phase();

        #[cfg(debug_assertions)]
        assert_invariants(self);

        outcome
    }

    fn play(&mut self, intent: Intent) -> GameOutcome {
        match intent {
            Intent::StartOrExtend(pos) => {
                self.move_cursor(pos);
                let change = self.chain.start_or_extend(pos, &self.grid);
                self.publish_chain(change);
            }
            Intent::ExtendOnly(pos) => {
                self.move_cursor(pos);
                let change = self.chain.extend_only(pos, &self.grid);
                self.publish_chain(change);
            }
            Intent::DragExtend(pos) => {
                self.move_cursor(pos);
                let change = self.chain.drag_extend(pos, &self.grid);
                self.publish_chain(change);
            }
            Intent::Cancel => {
                if !self.chain.is_empty() {
                    self.chain.cancel();
                    self.publish_chain(ChainChange::Retracted);
                }
            }
            Intent::Commit => return self.commit(),
            Intent::Navigate(direction) => {
                let dimensions = self.grid.dimensions();
                let target = self
                    .cursor
                    .step(direction, dimensions.columns(), dimensions.rows());
                self.move_cursor(target);
            }
            Intent::SetCursor(pos) => self.move_cursor(pos),
            Intent::RequestQuit => self.phase = GamePhase::AwaitingQuitConfirmation,
            Intent::RequestReset => self.phase = GamePhase::AwaitingResetConfirmation,
            Intent::Confirm | Intent::SaveAndQuit | Intent::Resume => {}
        }
        GameOutcome::Continue
    }

    fn commit(&mut self) -> GameOutcome {
        let range_before = self.resolver.range();
        let merge = self
            .resolver
            .commit(&mut self.chain, &mut self.grid, &mut self.rng);
        let Some(merge) = merge else {
            return GameOutcome::Continue;
        };
        self.pump_grid_events();
        self.publish_chain(ChainChange::Retracted);
        if self.resolver.range() != range_before {
            self.events
                .push(PresentationEvent::RangeChanged(self.resolver.range()));
        }
        self.push_score();
        GameOutcome::Merged(merge)
    }

    fn end(&mut self) -> GameOutcome {
        let report = self.report();
        info!(points = %report.points, highest = report.highest_tile, "Game ended");
        GameOutcome::Ended(report)
    }

    fn restart(&mut self) -> GameOutcome {
        let report = self.report();
        info!(points = %report.points, highest = report.highest_tile, "Starting next game");
        self.grid = Grid::new(self.grid.dimensions());
        self.chain.cancel();
        self.resolver.reset_range();
        self.phase = GamePhase::Playing;
        self.publish_chain(ChainChange::Retracted);
        self.start();
        GameOutcome::Restarted(report)
    }

    fn resume(&mut self) -> GameOutcome {
        debug!("Back to playing");
        self.phase = GamePhase::Playing;
        GameOutcome::Continue
    }

    fn refresh_phase(&mut self) {
        if self.phase == GamePhase::Playing && !self.grid.check_connections_possible() {
            info!("No more moves");
            self.phase = GamePhase::AwaitingNoMovesDecision;
        }
    }

    fn move_cursor(&mut self, pos: TilePos) {
        if pos == self.cursor || !self.grid.dimensions().contains(pos) {
            return;
        }
        self.events.push(PresentationEvent::Highlight {
            pos: self.cursor,
            on: false,
        });
        self.cursor = pos;
        self.events.push(PresentationEvent::Highlight { pos, on: true });
    }

    fn publish_chain(&mut self, change: ChainChange) {
        if change.changed() {
            self.events.push(PresentationEvent::MarkedChanged(
                self.chain.positions().to_vec(),
            ));
        }
    }

    fn push_score(&mut self) {
        self.events.push(PresentationEvent::ScoreChanged {
            points: self.score(),
            highest: self.highest_number(),
        });
    }

    fn pump_grid_events(&mut self) {
        let events = self.grid.drain_events();
        self.events.extend(events);
    }
}

/// Asserts that every game invariant holds.
///
/// # Panics
///
/// Panics listing every violated invariant.
#[instrument(skip(game))]
pub fn assert_invariants(game: &Game) {
    if let Err(violations) = GameInvariants::check_all(game) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Invariant violation: {}", descriptions);
    }
}
