use std::sync::Arc;

use crate::application::ports::{
    ChatClient, CrmClient, FileDownloader, MediaStore, TranscriptionEngine,
};
use crate::application::services::{AudioFetcher, CallAnalyzer, CommentPublisher};
use crate::domain::WebhookEvent;

pub const MSG_PROCESSED: &str = "Processed successfully";
pub const MSG_NO_FILE: &str = "No file attached. Comment processed.";
pub const MSG_COMMENT_ID_NOT_FOUND: &str = "Comment ID not found";
pub const MSG_COMMENT_FETCH_FAILED: &str = "Failed to retrieve comment details";
pub const MSG_LEAD_ID_NOT_FOUND: &str = "Lead ID not found";
pub const MSG_DOWNLOAD_FAILED: &str = "Failed to download audio file";
pub const MSG_TRANSCRIPTION_FAILED: &str = "Failed to transcribe audio";

/// Terminal state of one webhook delivery. Unexpected faults (panics) are
/// not represented here; the router's panic layer answers those with 500.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Client-input or stage failure; the handler answers 400.
    Rejected { message: String },
    /// The comment has no attachment: a successful no-op, answered 200.
    NoFileAttached,
    /// Full pipeline success, possibly with publish warnings; 200.
    Processed { warnings: Vec<String> },
}

/// The linear, short-circuiting orchestration:
/// extract comment id → fetch comment → extract lead id → extract file id →
/// download audio → transcribe → analyze → publish. Each stage failure
/// terminates the remaining pipeline for that request; analysis failures
/// are the one exception and flow into publishing as structured outcomes.
pub struct WebhookPipeline<C, D, M, L>
where
    C: CrmClient,
    D: FileDownloader,
    M: MediaStore,
    L: ChatClient,
{
    crm: Arc<C>,
    audio_fetcher: AudioFetcher<C, D, M>,
    transcriber: Arc<dyn TranscriptionEngine>,
    analyzer: CallAnalyzer<L>,
    publisher: CommentPublisher<C>,
}

impl<C, D, M, L> WebhookPipeline<C, D, M, L>
where
    C: CrmClient,
    D: FileDownloader,
    M: MediaStore,
    L: ChatClient,
{
    pub fn new(
        crm: Arc<C>,
        audio_fetcher: AudioFetcher<C, D, M>,
        transcriber: Arc<dyn TranscriptionEngine>,
        analyzer: CallAnalyzer<L>,
        publisher: CommentPublisher<C>,
    ) -> Self {
        Self {
            crm,
            audio_fetcher,
            transcriber,
            analyzer,
            publisher,
        }
    }

    pub async fn process(&self, event: &WebhookEvent) -> PipelineOutcome {
        let Some(comment_id) = event.comment_id() else {
            tracing::warn!("Webhook event carries no comment id");
            return PipelineOutcome::Rejected {
                message: MSG_COMMENT_ID_NOT_FOUND.to_string(),
            };
        };

        tracing::info!(comment_id = %comment_id, "Processing webhook event");

        let comment = match self.crm.get_comment(&comment_id).await {
            Ok(comment) => comment,
            Err(e) => {
                tracing::error!(comment_id = %comment_id, error = %e, "Failed to fetch comment");
                return PipelineOutcome::Rejected {
                    message: MSG_COMMENT_FETCH_FAILED.to_string(),
                };
            }
        };

        let Some(lead_id) = comment.entity_id.clone() else {
            tracing::warn!(comment_id = %comment_id, "Comment has no lead id");
            return PipelineOutcome::Rejected {
                message: MSG_LEAD_ID_NOT_FOUND.to_string(),
            };
        };

        let Some(file) = comment.first_file() else {
            tracing::info!(comment_id = %comment_id, "No file attached to comment");
            return PipelineOutcome::NoFileAttached;
        };

        // Any fetch failure, a local write fault included, is a failure of
        // the download stage and terminates with 400.
        let stored = match self.audio_fetcher.fetch(&file.id).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(file_id = %file.id, error = %e, "Failed to download audio");
                return PipelineOutcome::Rejected {
                    message: MSG_DOWNLOAD_FAILED.to_string(),
                };
            }
        };

        let transcript = match self.transcriber.transcribe(&stored.path).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!(path = %stored.path.display(), "Transcription came back empty");
                return PipelineOutcome::Rejected {
                    message: MSG_TRANSCRIPTION_FAILED.to_string(),
                };
            }
            Err(e) => {
                tracing::error!(path = %stored.path.display(), error = %e, "Transcription failed");
                return PipelineOutcome::Rejected {
                    message: MSG_TRANSCRIPTION_FAILED.to_string(),
                };
            }
        };

        tracing::info!(chars = transcript.len(), "Transcription completed");

        let analysis = self.analyzer.analyze(&transcript).await;

        let warnings = self
            .publisher
            .publish_results(&lead_id, &transcript, &analysis)
            .await;

        tracing::info!(
            lead_id = %lead_id,
            warnings = warnings.len(),
            "Webhook event processed"
        );

        PipelineOutcome::Processed { warnings }
    }
}
