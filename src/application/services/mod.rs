mod audio_fetcher;
mod call_analyzer;
mod comment_publisher;
mod pipeline;
mod retry;

pub use audio_fetcher::{AudioFetchError, AudioFetcher};
pub use call_analyzer::CallAnalyzer;
pub use comment_publisher::{CommentPublisher, PublishError};
pub use pipeline::{
    PipelineOutcome, WebhookPipeline, MSG_COMMENT_FETCH_FAILED, MSG_COMMENT_ID_NOT_FOUND,
    MSG_DOWNLOAD_FAILED, MSG_LEAD_ID_NOT_FOUND, MSG_NO_FILE, MSG_PROCESSED,
    MSG_TRANSCRIPTION_FAILED,
};
pub use retry::backoff_delay;
