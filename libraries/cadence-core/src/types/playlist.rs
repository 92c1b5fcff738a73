//! Playlist types

use serde::{Deserialize, Serialize};

/// A named, ordered list of song names owned by one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub photo: String,
    pub description: String,
    /// Creation timestamp, `%Y-%m-%dT%H:%M:%S`
    pub upload_date: String,
    pub owner: String,
    pub song_names: Vec<String>,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub photo: String,
    pub description: String,
    pub owner: String,
    pub song_names: Vec<String>,
}

/// Full replacement of a playlist's mutable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlaylist {
    /// Rename target; `None` keeps the current name
    pub new_name: Option<String>,
    pub photo: String,
    pub description: String,
    pub song_names: Vec<String>,
}
