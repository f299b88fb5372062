//! Error types for emitter2d.
//!
//! The simulation itself never fails: degenerate configurations simply emit
//! nothing. Errors only arise when reading or writing configuration files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving an [`EmitterConfig`](crate::EmitterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("failed to access emitter config {path:?}: {source}")]
    Io {
        /// File that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file contents are not a valid emitter config.
    #[error("invalid emitter config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
