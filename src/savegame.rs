//! Save slot for a board left with "save for later".

use crate::AppError;
use connect_log2_engine::{GridDimensions, GridSnapshot};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// One saved board, stored as a JSON array of cell numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    /// Binds the slot to a file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing the slot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if a file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the saved board for a grid of `dimensions`.
    ///
    /// Returns `None` if there is nothing saved. An unreadable payload, or
    /// one that does not fit the grid, is removed and also gives `None`.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self, dimensions: GridDimensions) -> Option<GridSnapshot> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No saved game");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved game");
                return None;
            }
        };
        let snapshot = match serde_json::from_str::<GridSnapshot>(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Corrupt saved game, discarding");
                self.discard();
                return None;
            }
        };
        if snapshot.cells().len() != dimensions.cell_count() {
            warn!(
                expected = dimensions.cell_count(),
                actual = snapshot.cells().len(),
                "Saved game does not fit the board, discarding"
            );
            self.discard();
            return None;
        }
        info!("Loaded saved game");
        Some(snapshot)
    }

    /// Writes `snapshot` to the slot.
    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    pub fn store(&self, snapshot: &GridSnapshot) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(snapshot)?;
        std::fs::write(&self.path, json)?;
        info!(cells = snapshot.cells().len(), "Saved game for later");
        Ok(())
    }

    /// Deletes the slot file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn remove(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed saved game");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the slot file, logging instead of failing.
    pub fn discard(&self) {
        if let Err(e) = self.remove() {
            warn!(error = %e, "Could not remove saved game");
        }
    }
}
