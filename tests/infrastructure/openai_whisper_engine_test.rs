use std::io::Write;

use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use leadscribe::application::ports::{TranscriptionEngine, TranscriptionError};
use leadscribe::infrastructure::audio::OpenAiWhisperEngine;

async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn fake_recording(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("1700000000_call.mp3");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&[0u8; 2048]).unwrap();
    path
}

#[tokio::test]
async fn given_valid_recording_when_transcribing_then_returns_trimmed_text() {
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, "hello world\n").await;
    let dir = tempfile::tempdir().unwrap();
    let path = fake_recording(&dir);

    let engine = OpenAiWhisperEngine::new(
        "sk-test-key".to_string(),
        Some(base_url),
        Some("whisper-1".to_string()),
    )
    .unwrap();

    let transcript = engine.transcribe(&path).await.unwrap();

    assert_eq!(transcript, "hello world");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_file_when_transcribing_then_returns_file_not_found() {
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, "unused").await;

    let engine = OpenAiWhisperEngine::new(
        "sk-test-key".to_string(),
        Some(base_url),
        None,
    )
    .unwrap();

    let result = engine
        .transcribe(std::path::Path::new("/nonexistent/call.mp3"))
        .await;

    assert!(matches!(result, Err(TranscriptionError::FileNotFound(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_error_when_transcribing_then_returns_api_error() {
    let (base_url, shutdown_tx) = start_mock_whisper_server(500, "boom").await;
    let dir = tempfile::tempdir().unwrap();
    let path = fake_recording(&dir);

    let engine = OpenAiWhisperEngine::new(
        "sk-test-key".to_string(),
        Some(base_url),
        None,
    )
    .unwrap();

    let result = engine.transcribe(&path).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}
