/// Song lifecycle - keeps metadata and audio blobs consistent
use super::guard::ArtistGuard;
use bytes::Bytes;
use cadence_core::{
    AudioStore, CadenceError, CreateSong, DurationProbe, GenreCatalog, Result, Song,
    StorageContext,
};
use std::sync::Arc;

/// Coordinates the metadata store and the blob store for songs.
///
/// Metadata is always written before the audio and removed before the
/// audio, so a failure in the second step is undone by reverting the
/// first. Concurrent creates of one name are settled by the metadata
/// primary key: the loser sees `SongAlreadyExists` and never touches the
/// blob of the winner.
#[derive(Clone)]
pub struct SongService {
    db: Arc<dyn StorageContext>,
    audio: Arc<dyn AudioStore>,
    probe: Arc<dyn DurationProbe>,
    guard: ArtistGuard,
    catalog: GenreCatalog,
}

impl SongService {
    pub fn new(
        db: Arc<dyn StorageContext>,
        audio: Arc<dyn AudioStore>,
        probe: Arc<dyn DurationProbe>,
        catalog: GenreCatalog,
    ) -> Self {
        Self {
            guard: ArtistGuard::new(Arc::clone(&db)),
            db,
            audio,
            probe,
            catalog,
        }
    }

    pub fn catalog(&self) -> &GenreCatalog {
        &self.catalog
    }

    pub fn guard(&self) -> &ArtistGuard {
        &self.guard
    }

    /// Upload a new song owned by `caller`
    #[tracing::instrument(skip(self, input, audio), fields(song = %input.name))]
    pub async fn create(&self, input: CreateSong, caller: &str, audio: &[u8]) -> Result<Song> {
        self.guard.assert_can_upload(caller).await?;

        if input.name.trim().is_empty() {
            return Err(CadenceError::invalid_input("Song name cannot be empty"));
        }
        if audio.is_empty() {
            return Err(CadenceError::invalid_input("Audio file is required"));
        }

        let genre = self.catalog.parse(&input.genre)?;

        if self.db.get_song(&input.name).await?.is_some() {
            return Err(CadenceError::SongAlreadyExists(input.name));
        }

        let seconds_duration = self.probe.probe_duration(audio).unwrap_or_else(|| {
            tracing::warn!(song = %input.name, "Could not read duration, storing 0");
            0.0
        });

        let song = Song::new(input.name, caller, genre, input.photo, seconds_duration);
        self.db.create_song(&song).await?;

        if let Err(e) = self.audio.put(&song.name, audio).await {
            tracing::error!(song = %song.name, error = %e, "Audio upload failed, reverting metadata");
            if let Err(revert) = self.db.delete_song(&song.name).await {
                tracing::error!(
                    song = %song.name,
                    error = %revert,
                    "Could not revert song metadata after failed upload"
                );
            }
            return Err(e);
        }

        tracing::info!(song = %song.name, artist = caller, "Song created");
        Ok(song)
    }

    pub async fn get(&self, name: &str) -> Result<Song> {
        self.db
            .get_song(name)
            .await?
            .ok_or_else(|| CadenceError::SongNotFound(name.to_string()))
    }

    /// Remove a song's metadata and audio
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        let song = self.get(name).await?;

        self.db.delete_song(name).await?;

        if let Err(e) = self.audio.delete(name).await {
            tracing::error!(song = name, error = %e, "Audio delete failed, restoring metadata");
            if let Err(restore) = self.db.restore_song(&song).await {
                tracing::error!(
                    song = name,
                    error = %restore,
                    "Could not restore song metadata after failed delete"
                );
            }
            return Err(e);
        }

        tracing::info!(song = name, "Song deleted");
        Ok(())
    }

    pub async fn increase_streams(&self, name: &str) -> Result<()> {
        self.db.increase_song_streams(name).await
    }

    pub async fn list_all(&self) -> Result<Vec<Song>> {
        self.db.get_all_songs().await
    }

    pub async fn list_by_genre(&self, label: &str) -> Result<Vec<Song>> {
        let genre = self.catalog.parse(label)?;
        self.db.get_songs_by_genre(genre).await
    }

    /// Stored audio of an existing song
    pub async fn audio(&self, name: &str) -> Result<Bytes> {
        self.get(name).await?;

        match self.audio.get(name).await? {
            Some(data) => Ok(Bytes::from(data)),
            None => {
                tracing::error!(song = name, "Song metadata exists without audio");
                Err(CadenceError::storage(format!("Audio missing for song: {}", name)))
            }
        }
    }
}
