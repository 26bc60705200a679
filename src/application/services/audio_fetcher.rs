use std::sync::Arc;

use crate::application::ports::{
    CrmClient, CrmClientError, DownloadError, FileDownloader, MediaStore, MediaStoreError,
    StoredAudio,
};
use crate::domain::{derive_audio_filename, FileId};

/// Anything smaller is treated as a corrupt or empty download.
const MIN_VALID_BYTES: u64 = 1024;

/// Resolves a CRM file id to a download URL, streams the body into the
/// media store under a unique name and validates the result.
pub struct AudioFetcher<C, D, M>
where
    C: CrmClient,
    D: FileDownloader,
    M: MediaStore,
{
    crm: Arc<C>,
    downloader: Arc<D>,
    store: Arc<M>,
}

impl<C, D, M> AudioFetcher<C, D, M>
where
    C: CrmClient,
    D: FileDownloader,
    M: MediaStore,
{
    pub fn new(crm: Arc<C>, downloader: Arc<D>, store: Arc<M>) -> Self {
        Self {
            crm,
            downloader,
            store,
        }
    }

    pub async fn fetch(&self, file_id: &FileId) -> Result<StoredAudio, AudioFetchError> {
        let url = self
            .crm
            .resolve_download_url(file_id)
            .await
            .map_err(AudioFetchError::Resolve)?;

        tracing::debug!(file_id = %file_id, "Resolved authenticated download URL");

        let download = self
            .downloader
            .download(&url)
            .await
            .map_err(AudioFetchError::Download)?;

        let filename = derive_audio_filename(
            download.content_disposition.as_deref(),
            chrono::Utc::now().timestamp(),
        );

        let stored = self
            .store
            .store(&filename, download.body)
            .await
            .map_err(AudioFetchError::Store)?;

        if stored.bytes < MIN_VALID_BYTES {
            tracing::warn!(
                bytes = stored.bytes,
                filename = %filename,
                "Downloaded file too small to be a valid recording, deleting"
            );
            if let Err(e) = self.store.delete(&filename).await {
                tracing::warn!(error = %e, filename = %filename, "Failed to delete corrupt download");
            }
            return Err(AudioFetchError::TooSmall(stored.bytes));
        }

        tracing::info!(
            path = %stored.path.display(),
            bytes = stored.bytes,
            "Recording downloaded"
        );

        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioFetchError {
    #[error("resolve: {0}")]
    Resolve(CrmClientError),
    #[error("download: {0}")]
    Download(DownloadError),
    #[error("store: {0}")]
    Store(MediaStoreError),
    #[error("downloaded file too small: {0} bytes")]
    TooSmall(u64),
}
