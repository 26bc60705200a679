use std::collections::HashMap;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{ChatClient, CrmClient, FileDownloader, MediaStore};
use crate::application::services::{PipelineOutcome, MSG_NO_FILE, MSG_PROCESSED};
use crate::domain::WebhookEvent;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Receives `ONCRMTIMELINECOMMENTADD` deliveries from Bitrix24 and runs the
/// processing pipeline to a terminal state. The response is always JSON with
/// either a `message` or an `error` field.
#[tracing::instrument(skip(state, fields))]
pub async fn webhook_handler<C, D, M, L>(
    State(state): State<AppState<C, D, M, L>>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl IntoResponse
where
    C: CrmClient + 'static,
    D: FileDownloader + 'static,
    M: MediaStore + 'static,
    L: ChatClient + 'static,
{
    let event = WebhookEvent::new(fields);

    match state.pipeline.process(&event).await {
        PipelineOutcome::Rejected { message } => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        PipelineOutcome::NoFileAttached => (
            StatusCode::OK,
            Json(MessageResponse {
                message: MSG_NO_FILE.to_string(),
                warnings: Vec::new(),
            }),
        )
            .into_response(),
        PipelineOutcome::Processed { warnings } => (
            StatusCode::OK,
            Json(MessageResponse {
                message: MSG_PROCESSED.to_string(),
                warnings,
            }),
        )
            .into_response(),
    }
}

/// The CRM only ever POSTs; anything else is a malformed delivery, answered
/// 400 rather than the default 405.
pub async fn invalid_method_handler() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid request".to_string(),
        }),
    )
}
