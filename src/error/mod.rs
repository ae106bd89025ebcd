//! Error handling module for Recut

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Recut operations
#[derive(Error, Debug)]
pub enum RecutError {
    /// Timeline, keyframe or project rule violated
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Project file could not be parsed
    #[error("Invalid project JSON: {0}")]
    ProjectJson(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    /// Edit operation string could not be understood
    #[error("Invalid edit operation '{op}': {message}")]
    InvalidOperation { op: String, message: String },

    /// Logging could not be initialised
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Export finished without success
    #[error("Export failed after {frames} frames")]
    ExportFailed { frames: u64 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Recut operations
pub type RecutResult<T> = std::result::Result<T, RecutError>;
