use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{MediaStore, MediaStoreError, StoredAudio};

/// The media directory on local disk. Downloads stream straight into it in
/// chunks; successful artifacts are kept indefinitely.
pub struct LocalMediaStore {
    inner: Arc<LocalFileSystem>,
    base_dir: PathBuf,
}

impl LocalMediaStore {
    /// Creates the media directory if it does not exist yet.
    pub fn new(base_dir: PathBuf) -> Result<Self, MediaStoreError> {
        std::fs::create_dir_all(&base_dir).map_err(MediaStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_dir)
            .map_err(|e| MediaStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_dir,
        })
    }
}

#[async_trait::async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(
        &self,
        filename: &str,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<StoredAudio, MediaStoreError> {
        let store_path = StorePath::from(filename);
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| MediaStoreError::WriteFailed(e.to_string()))?;

        let mut bytes_written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(MediaStoreError::Io(e));
                }
            };
            bytes_written += chunk.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(chunk)).await {
                let _ = upload.abort().await;
                return Err(MediaStoreError::WriteFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| MediaStoreError::WriteFailed(e.to_string()))?;

        Ok(StoredAudio {
            path: self.base_dir.join(filename),
            bytes: bytes_written,
        })
    }

    async fn delete(&self, filename: &str) -> Result<(), MediaStoreError> {
        let store_path = StorePath::from(filename);
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))
    }
}
