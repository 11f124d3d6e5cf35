// Error types for arbor.
// Covers persistence, configuration, and terminal I/O failures in the host layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArborError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine a home directory for arbor")]
    NoProjectDirs,

    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ArborError>;
