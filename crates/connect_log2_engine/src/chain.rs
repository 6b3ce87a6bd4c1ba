//! Marking rules: which positions may join the pending chain.
//!
//! The builder does not care where an intent came from. A key press, a
//! click, a double click and a drag all end up in one of the three
//! marking operations below.

use crate::grid::Grid;
use crate::position::TilePos;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What a marking operation did to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainChange {
    /// The first position was marked.
    Started,
    /// A position was appended.
    Extended,
    /// The last position was unmarked.
    Retracted,
    /// Nothing changed.
    Unchanged,
}

impl ChainChange {
    /// Returns true unless the chain stayed as it was.
    pub fn changed(self) -> bool {
        self != ChainChange::Unchanged
    }
}

/// Ordered, connected run of marked positions waiting to be committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainBuilder {
    chain: Vec<TilePos>,
}

impl ChainBuilder {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the marked positions in marking order.
    pub fn positions(&self) -> &[TilePos] {
        &self.chain
    }

    /// Returns true if nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Number of marked positions.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns the most recently marked position.
    pub fn last(&self) -> Option<TilePos> {
        self.chain.last().copied()
    }

    /// Returns true if `pos` is marked.
    pub fn contains(&self, pos: TilePos) -> bool {
        self.chain.contains(&pos)
    }

    /// Toggles a mark: starts, undoes the last mark, or extends.
    #[instrument(skip(self, grid))]
    pub fn start_or_extend(&mut self, pos: TilePos, grid: &Grid) -> ChainChange {
        if grid.get_tile(pos).is_none() {
            return ChainChange::Unchanged;
        }
        if self.chain.is_empty() {
            return self.try_start(pos, grid);
        }
        if self.last() == Some(pos) {
            self.chain.pop();
            debug!(len = self.chain.len(), "Unmarked last tile");
            return ChainChange::Retracted;
        }
        if self.contains(pos) {
            return ChainChange::Unchanged;
        }
        self.try_extend(pos, grid)
    }

    /// Marks without ever unmarking: starts or extends.
    #[instrument(skip(self, grid))]
    pub fn extend_only(&mut self, pos: TilePos, grid: &Grid) -> ChainChange {
        if grid.get_tile(pos).is_none() {
            return ChainChange::Unchanged;
        }
        if self.chain.is_empty() {
            return self.try_start(pos, grid);
        }
        if self.contains(pos) {
            return ChainChange::Unchanged;
        }
        self.try_extend(pos, grid)
    }

    /// Follows a drag: moving back onto the previous mark undoes the last one.
    #[instrument(skip(self, grid))]
    pub fn drag_extend(&mut self, pos: TilePos, grid: &Grid) -> ChainChange {
        if grid.get_tile(pos).is_none() || self.chain.is_empty() {
            return ChainChange::Unchanged;
        }
        let len = self.chain.len();
        if len >= 2 && self.chain[len - 2] == pos {
            self.chain.pop();
            debug!(len = self.chain.len(), "Drag retreated");
            return ChainChange::Retracted;
        }
        if self.contains(pos) {
            return ChainChange::Unchanged;
        }
        self.try_extend(pos, grid)
    }

    /// Drops every mark.
    pub fn cancel(&mut self) {
        self.chain.clear();
    }

    /// Removes and returns the marks, leaving the chain empty.
    pub(crate) fn take(&mut self) -> Vec<TilePos> {
        std::mem::take(&mut self.chain)
    }

    /// Sums the real values of the marked tiles.
    pub fn summary(&self, grid: &Grid) -> Option<ChainSummary> {
        let values: Vec<u128> = self
            .chain
            .iter()
            .filter_map(|pos| grid.get_tile(*pos))
            .map(|tile| tile.real_value())
            .collect();
        (!values.is_empty()).then(|| ChainSummary::new(values))
    }

    fn try_start(&mut self, pos: TilePos, grid: &Grid) -> ChainChange {
        if grid.check_connections_possible_for_pos(pos) {
            self.chain.push(pos);
            debug!(%pos, "Started chain");
            ChainChange::Started
        } else {
            ChainChange::Unchanged
        }
    }

    /// A candidate joins if it touches the last mark and either equals it or,
    /// once the chain holds a pair, is exactly one higher.
    fn try_extend(&mut self, pos: TilePos, grid: &Grid) -> ChainChange {
        let Some(last) = self.last() else {
            return ChainChange::Unchanged;
        };
        if !pos.is_neighbour(last) {
            return ChainChange::Unchanged;
        }
        let (Some(candidate), Some(previous)) = (grid.get_tile(pos), grid.get_tile(last)) else {
            return ChainChange::Unchanged;
        };
        let same = candidate.number == previous.number;
        let step_up =
            self.chain.len() > 1 && Some(candidate.number) == previous.number.checked_add(1);
        if same || step_up {
            self.chain.push(pos);
            debug!(%pos, len = self.chain.len(), "Extended chain");
            ChainChange::Extended
        } else {
            ChainChange::Unchanged
        }
    }
}

/// Running total of a pending chain, for status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    values: Vec<u128>,
    total: u128,
}

impl ChainSummary {
    fn new(values: Vec<u128>) -> Self {
        let total = values.iter().fold(0u128, |acc, v| acc.saturating_add(*v));
        Self { values, total }
    }

    /// Real values of the marked tiles, in marking order.
    pub fn values(&self) -> &[u128] {
        &self.values
    }

    /// Sum of the real values.
    pub fn total(&self) -> u128 {
        self.total
    }

    /// `log2` of the total.
    pub fn log2(&self) -> f64 {
        (self.total as f64).log2()
    }
}

impl std::fmt::Display for ChainSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let terms: Vec<String> = self.values.iter().map(u128::to_string).collect();
        write!(
            f,
            "{} (2^{:.2}) = {}",
            self.total,
            self.log2(),
            terms.join(" + ")
        )
    }
}
