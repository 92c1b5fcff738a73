/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type for Cadence
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Genre label is not a member of the active catalog
    #[error("The genre doesn't exist: {0}")]
    GenreNotValid(String),

    /// Song not found
    #[error("Song not found: {0}")]
    SongNotFound(String),

    /// A song with this name already exists
    #[error("Song already exists: {0}")]
    SongAlreadyExists(String),

    /// Artist not found
    #[error("Artist not found: {0}")]
    ArtistNotFound(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// A user or artist with this name already exists
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// Caller holds the user role but the operation needs an artist
    #[error("User is not an artist: {0}")]
    UserNotArtist(String),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// A playlist with this name already exists
    #[error("Playlist already exists: {0}")]
    PlaylistAlreadyExists(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors (blob store, inconsistent state)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CadenceError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for the "entity absent" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SongNotFound(_)
                | Self::ArtistNotFound(_)
                | Self::UserNotFound(_)
                | Self::PlaylistNotFound(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CadenceError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
