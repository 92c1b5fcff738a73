//! Search results

use super::{Artist, Playlist, Song, User};
use serde::{Deserialize, Serialize};

/// Everything whose name matched a search query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub artists: Vec<Artist>,
    pub playlists: Vec<Playlist>,
    pub users: Vec<User>,
    pub songs: Vec<Song>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
            && self.playlists.is_empty()
            && self.users.is_empty()
            && self.songs.is_empty()
    }
}
