// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Frame rate or duration not known yet
    MediaNotLoaded,
    /// An output frame past the end of the kept frames was requested
    OutputFrameOutOfRange { requested: i64, available: i64 },
    /// Project file could not be read or parsed
    InvalidProject(String),
    /// Transcoder collaborator failed
    Transcode(String),
    /// File system failure
    Io(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::MediaNotLoaded => write!(f, "No media loaded (frame rate or duration is zero)"),
            DomainError::OutputFrameOutOfRange { requested, available } => write!(
                f,
                "Output frame {} is past the {} available output frames",
                requested, available
            ),
            DomainError::InvalidProject(msg) => write!(f, "Invalid project file: {}", msg),
            DomainError::Transcode(msg) => write!(f, "Transcode failed: {}", msg),
            DomainError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}
