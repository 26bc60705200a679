use std::collections::HashMap;

use super::CommentId;

/// Form key Bitrix24 uses for the comment id in `ONCRMTIMELINECOMMENTADD`
/// deliveries.
const COMMENT_ID_FIELD: &str = "data[FIELDS][ID]";

/// An inbound CRM webhook delivery: an opaque key-value payload decoded
/// from the form-encoded request body. Lives for one request.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    fields: HashMap<String, String>,
}

impl WebhookEvent {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// The id of the comment the event refers to, if the payload carries one.
    pub fn comment_id(&self) -> Option<CommentId> {
        self.fields
            .get(COMMENT_ID_FIELD)
            .filter(|v| !v.is_empty())
            .map(CommentId::new)
    }
}
