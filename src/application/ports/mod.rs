mod chat_client;
mod crm_client;
mod file_downloader;
mod media_store;
mod transcription_engine;

pub use chat_client::{ChatClient, ChatClientError, ChatRequest};
pub use crm_client::{CrmClient, CrmClientError};
pub use file_downloader::{DownloadError, FileDownload, FileDownloader};
pub use media_store::{MediaStore, MediaStoreError, StoredAudio};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
