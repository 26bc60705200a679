use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ChatClient, CrmClient, FileDownloader, MediaStore};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, invalid_method_handler, webhook_handler, ErrorResponse,
};
use crate::presentation::state::AppState;

/// Catch-all for request handling panics: the process keeps serving and
/// the client gets a JSON 500 carrying the panic text.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unexpected error".to_string()
    };

    tracing::error!(error = %detail, "Request handling panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: detail }),
    )
        .into_response()
}

pub fn create_router<C, D, M, L>(state: AppState<C, D, M, L>) -> Router
where
    C: CrmClient + 'static,
    D: FileDownloader + 'static,
    M: MediaStore + 'static,
    L: ChatClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/webhook/bitrix",
            post(webhook_handler::<C, D, M, L>).fallback(invalid_method_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
