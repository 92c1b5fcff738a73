//! Song types

use super::Genre;
use serde::{Deserialize, Serialize};

/// Metadata record of an uploaded track. The audio itself lives in the
/// blob store under the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique name, also the blob key
    pub name: String,
    /// Name of the owning artist
    pub artist: String,
    pub genre: Genre,
    pub photo: String,
    /// Play count, starts at 0 and only ever grows
    pub streams: u64,
    pub seconds_duration: f64,
}

/// Data for uploading a new song
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSong {
    pub name: String,
    pub genre: String,
    pub photo: String,
}

impl Song {
    /// A freshly uploaded song with no plays
    pub fn new(
        name: impl Into<String>,
        artist: impl Into<String>,
        genre: Genre,
        photo: impl Into<String>,
        seconds_duration: f64,
    ) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            genre,
            photo: photo.into(),
            streams: 0,
            seconds_duration,
        }
    }
}
