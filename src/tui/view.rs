//! What the terminal shows, rebuilt from drained presentation events.

use connect_log2_engine::{GridDimensions, PresentationEvent, TilePos, TileRange};
use derive_getters::Getters;
use tracing::trace;

/// Board state as last reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BoardView {
    dimensions: GridDimensions,
    cells: Vec<Option<u8>>,
    marked: Vec<TilePos>,
    highlight: Option<TilePos>,
    points: u128,
    highest: u8,
    range: TileRange,
}

impl BoardView {
    /// Creates an empty view.
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![None; dimensions.cell_count()],
            marked: Vec::new(),
            highlight: None,
            points: 0,
            highest: 0,
            range: TileRange::default(),
        }
    }

    /// Number shown at `pos`.
    pub fn number_at(&self, pos: TilePos) -> Option<u8> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Returns true if `pos` is part of the pending chain.
    pub fn is_marked(&self, pos: TilePos) -> bool {
        self.marked.contains(&pos)
    }

    /// Folds one event into the view.
    ///
    /// Returns true when the event ends the falling phase of a refill.
    pub fn apply(&mut self, event: &PresentationEvent) -> bool {
        trace!(?event, "View event");
        match event {
            PresentationEvent::TileSet { pos, number } => {
                if let Some(i) = self.index(*pos) {
                    self.cells[i] = Some(*number);
                }
            }
            PresentationEvent::TileRemoved { pos } => {
                if let Some(i) = self.index(*pos) {
                    self.cells[i] = None;
                }
            }
            PresentationEvent::DropsSettled => return true,
            PresentationEvent::Highlight { pos, on } => {
                if *on {
                    self.highlight = Some(*pos);
                } else if self.highlight == Some(*pos) {
                    self.highlight = None;
                }
            }
            PresentationEvent::MarkedChanged(marked) => self.marked = marked.clone(),
            PresentationEvent::ScoreChanged { points, highest } => {
                self.points = *points;
                self.highest = *highest;
            }
            PresentationEvent::RangeChanged(range) => self.range = *range,
        }
        false
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        self.dimensions
            .contains(pos)
            .then(|| (pos.y * self.dimensions.columns() + pos.x) as usize)
    }
}
