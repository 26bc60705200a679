use std::io;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// A download in progress: the response headers we care about plus the
/// body as a stream, so large recordings are never buffered whole.
pub struct FileDownload {
    pub content_disposition: Option<String>,
    pub body: BoxStream<'static, Result<Bytes, io::Error>>,
}

/// Streamed GET of an already-resolved (possibly redirecting) URL.
#[async_trait]
pub trait FileDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<FileDownload, DownloadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("upstream returned status {0}")]
    BadStatus(u16),
}
