use std::sync::Arc;

use crate::application::ports::{ChatClient, CrmClient, FileDownloader, MediaStore};
use crate::application::services::WebhookPipeline;

pub struct AppState<C, D, M, L>
where
    C: CrmClient,
    D: FileDownloader,
    M: MediaStore,
    L: ChatClient,
{
    pub pipeline: Arc<WebhookPipeline<C, D, M, L>>,
}

impl<C, D, M, L> Clone for AppState<C, D, M, L>
where
    C: CrmClient,
    D: FileDownloader,
    M: MediaStore,
    L: ChatClient,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}
