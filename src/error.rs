//! Application error type.

use connect_log2_engine::EngineError;
use derive_more::{Display, Error};
use tracing::instrument;

/// Application error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("connect_log2 error: {} at {}:{}", message, file, line)]
pub struct AppError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AppError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for AppError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Config parse error: {}", err))
    }
}

impl From<EngineError> for AppError {
    #[track_caller]
    fn from(err: EngineError) -> Self {
        Self::new(format!("Engine error: {}", err))
    }
}
