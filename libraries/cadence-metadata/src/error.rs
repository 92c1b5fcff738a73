/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Nothing to inspect
    #[error("Empty audio data")]
    Empty,

    /// Reading the in-memory buffer failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for cadence_core::CadenceError {
    fn from(err: MetadataError) -> Self {
        cadence_core::CadenceError::invalid_input(err.to_string())
    }
}
