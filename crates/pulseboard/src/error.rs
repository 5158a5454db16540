//! Application-wide error types using thiserror.

use pulseboard_common::DashError;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Pipeline, configuration or localization error.
    #[error(transparent)]
    Dash(#[from] DashError),

    /// Upload file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Document could not be written as JSON.
    #[error("Failed to serialize dashboard document: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
