use std::sync::Arc;

use crate::application::ports::{ChatClient, ChatClientError, ChatRequest};
use crate::application::services::retry::backoff_delay;
use crate::domain::{AnalysisFailureKind, AnalysisOutcome, CallAnalysis};

const FEEDBACK_SYSTEM_PROMPT: &str = "You are an assistant providing conversation feedback.";
const FEEDBACK_PROMPT: &str = "Analyze and provide brutal in details suggestions line by line \
     for the sales executive including service knowledge and overall sales approach:";

const SENTIMENT_SYSTEM_PROMPT: &str = "You are an assistant performing sentiment analysis.";
const SENTIMENT_PROMPT: &str =
    "Analyze the sentiment of the following conversation (Positive, Neutral, or Negative):";

/// Moderate temperature for varied feedback phrasing; zero for a
/// reproducible sentiment label.
const FEEDBACK_TEMPERATURE: f32 = 0.7;
const SENTIMENT_TEMPERATURE: f32 = 0.0;

const MAX_FEEDBACK_ATTEMPTS: u32 = 5;

/// Runs the two independent LLM calls over a call transcript: qualitative
/// feedback with rate-limit retries, and a single-shot sentiment label.
/// Neither call ever fails the request; failures become structured
/// [`AnalysisOutcome::Failed`] values.
pub struct CallAnalyzer<L>
where
    L: ChatClient,
{
    chat: Arc<L>,
}

impl<L> CallAnalyzer<L>
where
    L: ChatClient,
{
    pub fn new(chat: Arc<L>) -> Self {
        Self { chat }
    }

    pub async fn analyze(&self, transcript: &str) -> CallAnalysis {
        CallAnalysis {
            feedback: self.generate_feedback(transcript).await,
            sentiment: self.analyze_sentiment(transcript).await,
        }
    }

    /// Up to five attempts; only a rate-limit error is retried, with an
    /// exponential 2^attempt-second delay between tries. Any other provider
    /// error aborts immediately.
    pub async fn generate_feedback(&self, transcript: &str) -> AnalysisOutcome {
        if transcript.trim().is_empty() {
            tracing::warn!("Empty transcript provided, skipping feedback generation");
            return AnalysisOutcome::failed(
                AnalysisFailureKind::EmptyTranscript,
                "no transcript available",
            );
        }

        let request = ChatRequest {
            system: FEEDBACK_SYSTEM_PROMPT.to_string(),
            user: format!("{}\n\n{}", FEEDBACK_PROMPT, transcript),
            temperature: FEEDBACK_TEMPERATURE,
        };

        for attempt in 1..=MAX_FEEDBACK_ATTEMPTS {
            tracing::debug!(attempt, max = MAX_FEEDBACK_ATTEMPTS, "Requesting feedback");

            match self.chat.complete(&request).await {
                Ok(feedback) => {
                    tracing::info!(chars = feedback.len(), "Feedback generated");
                    return AnalysisOutcome::Generated(feedback);
                }
                Err(ChatClientError::RateLimited) => {
                    if attempt < MAX_FEEDBACK_ATTEMPTS {
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            delay_secs = delay.as_secs(),
                            "LLM rate limited, backing off"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Feedback generation failed");
                    return AnalysisOutcome::failed(AnalysisFailureKind::Provider, e.to_string());
                }
            }
        }

        tracing::error!(
            attempts = MAX_FEEDBACK_ATTEMPTS,
            "Giving up on feedback generation, rate limit never cleared"
        );
        AnalysisOutcome::failed(
            AnalysisFailureKind::RateLimitExhausted,
            format!("gave up after {} attempts", MAX_FEEDBACK_ATTEMPTS),
        )
    }

    /// Single attempt; any provider error yields a failed outcome.
    pub async fn analyze_sentiment(&self, transcript: &str) -> AnalysisOutcome {
        if transcript.trim().is_empty() {
            return AnalysisOutcome::failed(
                AnalysisFailureKind::EmptyTranscript,
                "no transcript available",
            );
        }

        let request = ChatRequest {
            system: SENTIMENT_SYSTEM_PROMPT.to_string(),
            user: format!("{}\n\n{}", SENTIMENT_PROMPT, transcript),
            temperature: SENTIMENT_TEMPERATURE,
        };

        match self.chat.complete(&request).await {
            Ok(sentiment) => {
                let sentiment = sentiment.trim().to_string();
                tracing::info!(sentiment = %sentiment, "Sentiment detected");
                AnalysisOutcome::Generated(sentiment)
            }
            Err(e) => {
                tracing::error!(error = %e, "Sentiment analysis failed");
                AnalysisOutcome::failed(AnalysisFailureKind::Provider, e.to_string())
            }
        }
    }
}
