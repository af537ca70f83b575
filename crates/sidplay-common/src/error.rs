//! Error types for engine backends

/// Error type for operations on a [`crate::SidEngine`] backend.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Tune could not be loaded or initialized
    #[error("tune error: {0}")]
    Tune(String),

    /// Requested subtune does not exist
    #[error("subtune {0} out of range")]
    TrackOutOfRange(u16),

    /// Engine delivered fewer samples than the cycle requested
    #[error("engine produced {produced} of {requested} samples")]
    ShortRead {
        /// Samples the scheduler asked for
        requested: usize,
        /// Samples actually rendered
        produced: usize,
    },

    /// Invalid engine configuration
    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// Generic engine failure
    #[error("{0}")]
    Other(String),
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Other(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::Other(s.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
