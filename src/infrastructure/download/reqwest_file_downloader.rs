use std::io;
use std::time::Duration;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_DISPOSITION;

use crate::application::ports::{DownloadError, FileDownload, FileDownloader};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Recordings can be large; allow long transfers without allowing hangs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Streamed GET of resolved download URLs. Redirects are followed because
/// the CRM hands out URLs that bounce through its CDN.
pub struct ReqwestFileDownloader {
    client: reqwest::Client,
}

impl ReqwestFileDownloader {
    pub fn new() -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DownloadError::RequestFailed(format!("client build: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FileDownloader for ReqwestFileDownloader {
    async fn download(&self, url: &str) -> Result<FileDownload, DownloadError> {
        tracing::debug!(url = %url, "Starting audio download");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::BadStatus(response.status().as_u16()));
        }

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
            .boxed();

        Ok(FileDownload {
            content_disposition,
            body,
        })
    }
}
