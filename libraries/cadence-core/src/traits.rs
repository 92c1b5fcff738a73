/// Collaborator traits for audio blobs
use crate::error::Result;
use async_trait::async_trait;

/// Binary object store for audio, keyed by song name
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Store (or replace) the blob for `name`
    async fn put(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Fetch the blob for `name`, `None` if absent
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Delete the blob for `name`; deleting an absent blob is not an error
    async fn delete(&self, name: &str) -> Result<()>;
}

/// Audio inspection
///
/// Implementers report the playing time of an in-memory audio file.
pub trait DurationProbe: Send + Sync {
    /// Duration in seconds, or `None` when the data cannot be understood
    fn probe_duration(&self, data: &[u8]) -> Option<f64>;
}
