use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// A recording persisted to the media directory.
#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub path: PathBuf,
    pub bytes: u64,
}

/// The media directory holding downloaded recordings. Successful artifacts
/// accumulate; only corrupt downloads are deleted.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Streams a download body into `filename`, returning where it landed
    /// and how many bytes were written.
    async fn store(
        &self,
        filename: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<StoredAudio, MediaStoreError>;

    async fn delete(&self, filename: &str) -> Result<(), MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
}
