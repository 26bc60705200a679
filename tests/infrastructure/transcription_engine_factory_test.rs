use leadscribe::infrastructure::audio::{TranscriptionEngineFactory, TranscriptionProvider};

#[test]
fn given_openai_provider_with_key_when_creating_then_succeeds() {
    let result = TranscriptionEngineFactory::create(
        TranscriptionProvider::OpenAi,
        "whisper-1",
        Some("sk-test-key".to_string()),
        None,
    );

    assert!(result.is_ok());
}

#[test]
fn given_openai_provider_without_key_when_creating_then_returns_error() {
    let result = TranscriptionEngineFactory::create(
        TranscriptionProvider::OpenAi,
        "whisper-1",
        None,
        None,
    );

    assert!(result.is_err());
}

#[test]
fn given_local_provider_with_missing_model_file_when_creating_then_returns_error() {
    let result = TranscriptionEngineFactory::create(
        TranscriptionProvider::Local,
        "/nonexistent/ggml-base.bin",
        None,
        None,
    );

    assert!(result.is_err());
}
