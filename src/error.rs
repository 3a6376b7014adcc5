//! Error types for scene assembly and tracing.

use thiserror::Error;

/// Errors that can occur while building or tracing a scene.
#[derive(Error, Debug)]
pub enum TraceError {
    /// A constructor or helper received a value it cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not defined for this kind of surface.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The scene file could not be parsed.
    #[error("invalid scene file: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl From<serde_json::Error> for TraceError {
    fn from(e: serde_json::Error) -> Self {
        TraceError::Config(e.to_string())
    }
}

/// Result type for tracer operations.
pub type Result<T> = std::result::Result<T, TraceError>;
