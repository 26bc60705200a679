use std::sync::Arc;

use crate::application::ports::CrmClient;
use crate::application::services::retry::backoff_delay;
use crate::domain::{AnalysisOutcome, CallAnalysis, LeadId};

const MAX_PUBLISH_ATTEMPTS: u32 = 3;

/// Posts pipeline results back to the lead's timeline. Publishing is
/// fire-and-forget: exhausted retries are logged and reported as warnings,
/// never surfaced as request failures.
pub struct CommentPublisher<C>
where
    C: CrmClient,
{
    crm: Arc<C>,
}

impl<C> CommentPublisher<C>
where
    C: CrmClient,
{
    pub fn new(crm: Arc<C>) -> Self {
        Self { crm }
    }

    /// Posts the transcription comment, then the feedback + sentiment
    /// comment when feedback was actually generated. Returns human-readable
    /// warnings for everything that could not be delivered.
    pub async fn publish_results(
        &self,
        lead: &LeadId,
        transcript: &str,
        analysis: &CallAnalysis,
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        let transcription_comment = format!("**Call Transcription:**\n{}", transcript);
        if let Err(e) = self.publish(lead, &transcription_comment).await {
            warnings.push(format!("transcription comment not posted: {}", e));
        }

        match &analysis.feedback {
            AnalysisOutcome::Generated(feedback) => {
                let sentiment = match &analysis.sentiment {
                    AnalysisOutcome::Generated(s) => s.as_str(),
                    AnalysisOutcome::Failed(failure) => {
                        warnings.push(format!("sentiment unavailable: {}", failure));
                        "unavailable"
                    }
                };
                let comment = format!(
                    "**AI Feedback:** {}\n\n**Sentiment:** {}",
                    feedback, sentiment
                );
                if let Err(e) = self.publish(lead, &comment).await {
                    warnings.push(format!("feedback comment not posted: {}", e));
                }
            }
            AnalysisOutcome::Failed(failure) => {
                tracing::info!(reason = %failure, "No valid feedback generated, skipping feedback comment");
                warnings.push(format!("feedback unavailable: {}", failure));
            }
        }

        warnings
    }

    /// Up to three attempts with 2^attempt-second delays between them; the
    /// delay after the final attempt is skipped.
    pub async fn publish(&self, lead: &LeadId, text: &str) -> Result<(), PublishError> {
        let mut last_error = String::new();

        for attempt in 1..=MAX_PUBLISH_ATTEMPTS {
            tracing::debug!(lead = %lead, attempt, max = MAX_PUBLISH_ATTEMPTS, "Posting comment");

            match self.crm.add_comment(lead, text).await {
                Ok(()) => {
                    tracing::info!(lead = %lead, "Comment posted");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(lead = %lead, attempt, error = %e, "Failed to post comment");
                    last_error = e.to_string();
                    if attempt < MAX_PUBLISH_ATTEMPTS {
                        tokio::time::sleep(backoff_delay(attempt)).await;
                    }
                }
            }
        }

        tracing::error!(
            lead = %lead,
            attempts = MAX_PUBLISH_ATTEMPTS,
            "Giving up on posting comment"
        );
        Err(PublishError::Exhausted {
            attempts: MAX_PUBLISH_ATTEMPTS,
            last_error,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}
