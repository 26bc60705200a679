use async_trait::async_trait;

use crate::domain::{CommentId, FileId, LeadId, TimelineComment};

/// The CRM REST surface this service depends on.
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Fetches a timeline comment by id.
    async fn get_comment(&self, id: &CommentId) -> Result<TimelineComment, CrmClientError>;

    /// Resolves a short-lived authenticated download URL for a disk file.
    async fn resolve_download_url(&self, id: &FileId) -> Result<String, CrmClientError>;

    /// Adds a plain-text comment to a lead's timeline.
    async fn add_comment(&self, lead: &LeadId, text: &str) -> Result<(), CrmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CrmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
