//! Player and storage configuration.
//!
//! Values come from a TOML file, then `CONNECT_LOG2_*` environment
//! variables (a `.env` file is loaded by the binary), then CLI flags.

use crate::AppError;
use connect_log2_engine::GridDimensions;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "connect_log2.toml";

const HISCORE_FILE: &str = "hiscore.json";
const SAVE_FILE: &str = "savegame.json";
const LOG_FILE: &str = "connect_log2.log";

/// Settings for one run of the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the high-score table, the save slot and the log.
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,

    /// Name written next to high scores.
    #[serde(default = "default_user")]
    user: String,

    /// Pause between the drop and fill phases of a refill.
    #[serde(default)]
    animation_delay_ms: u64,

    /// Board width.
    #[serde(default = "default_columns")]
    grid_columns: i32,

    /// Board height.
    #[serde(default = "default_rows")]
    grid_rows: i32,
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".connect_log2")
}

fn default_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "player".to_string())
}

fn default_columns() -> i32 {
    GridDimensions::DEFAULT_COLUMNS
}

fn default_rows() -> i32 {
    GridDimensions::DEFAULT_ROWS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            user: default_user(),
            animation_delay_ms: 0,
            grid_columns: default_columns(),
            grid_rows: default_rows(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::new(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        info!(user = %config.user, data_dir = %config.data_dir.display(), "Config loaded");
        Ok(config)
    }

    /// Resolves the configuration for a run.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// is used if present, else the defaults. Environment overrides are
    /// applied last.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides fields from `CONNECT_LOG2_*` variables looked up through `var`.
    #[instrument(skip(self, var))]
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("CONNECT_LOG2_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(user) = var("CONNECT_LOG2_USER") {
            self.user = user;
        }
        if let Some(delay) = var("CONNECT_LOG2_ANIMATION_DELAY_MS") {
            self.animation_delay_ms = parse_env("CONNECT_LOG2_ANIMATION_DELAY_MS", &delay)?;
        }
        if let Some(columns) = var("CONNECT_LOG2_GRID_COLUMNS") {
            self.grid_columns = parse_env("CONNECT_LOG2_GRID_COLUMNS", &columns)?;
        }
        if let Some(rows) = var("CONNECT_LOG2_GRID_ROWS") {
            self.grid_rows = parse_env("CONNECT_LOG2_GRID_ROWS", &rows)?;
        }
        Ok(())
    }

    /// Replaces the data directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Replaces the user name.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Board dimensions, validated.
    pub fn dimensions(&self) -> Result<GridDimensions, AppError> {
        Ok(GridDimensions::new(self.grid_columns, self.grid_rows)?)
    }

    /// Location of the high-score table.
    pub fn hiscore_path(&self) -> PathBuf {
        self.data_dir.join(HISCORE_FILE)
    }

    /// Location of the save slot.
    pub fn save_path(&self) -> PathBuf {
        self.data_dir.join(SAVE_FILE)
    }

    /// Location of the terminal front-end's log file.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    /// Creates the data directory if needed.
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub fn ensure_data_dir(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::new(format!("Invalid value for {}: {:?}", key, value)))
}
