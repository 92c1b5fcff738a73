/// File storage service - keeps audio blobs on disk, one file per song
use async_trait::async_trait;
use cadence_core::{AudioStore, CadenceError};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

const BLOB_EXTENSION: &str = "audio";

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Initialize the storage directory
    pub async fn initialize(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_path).await
    }

    /// Path of the blob for a song name.
    ///
    /// The file name is the SHA-256 of the song name, so it has a fixed
    /// length and can never escape the storage directory.
    pub fn blob_path(&self, name: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(name.as_bytes()));
        self.base_path
            .join(format!("{}.{}", digest, BLOB_EXTENSION))
    }
}

#[async_trait]
impl AudioStore for FileStorage {
    async fn put(&self, name: &str, data: &[u8]) -> cadence_core::Result<()> {
        let path = self.blob_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write then rename so readers never see a partial file
        let partial = path.with_extension("partial");
        fs::write(&partial, data).await?;
        if let Err(e) = fs::rename(&partial, &path).await {
            let _ = fs::remove_file(&partial).await;
            return Err(CadenceError::Io(e));
        }

        tracing::debug!(song = name, bytes = data.len(), "Stored audio blob");
        Ok(())
    }

    async fn get(&self, name: &str) -> cadence_core::Result<Option<Vec<u8>>> {
        match fs::read(self.blob_path(name)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, name: &str) -> cadence_core::Result<()> {
        match fs::remove_file(self.blob_path(name)).await {
            Ok(()) => {
                tracing::debug!(song = name, "Deleted audio blob");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
