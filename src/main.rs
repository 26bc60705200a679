use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use leadscribe::application::services::{
    AudioFetcher, CallAnalyzer, CommentPublisher, WebhookPipeline,
};
use leadscribe::infrastructure::audio::{TranscriptionEngineFactory, TranscriptionProvider};
use leadscribe::infrastructure::crm::BitrixClient;
use leadscribe::infrastructure::download::ReqwestFileDownloader;
use leadscribe::infrastructure::llm::OpenAiChatClient;
use leadscribe::infrastructure::observability::{init_tracing, TracingConfig};
use leadscribe::infrastructure::storage::LocalMediaStore;
use leadscribe::presentation::{create_router, AppState, Settings, TranscriptionProviderSetting};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let crm = Arc::new(BitrixClient::new(&settings.crm.webhook_base_url)?);
    let downloader = Arc::new(ReqwestFileDownloader::new()?);
    let media_store = Arc::new(LocalMediaStore::new(settings.media.dir.clone())?);

    let chat = Arc::new(OpenAiChatClient::new(
        settings.llm.api_key.clone(),
        settings.llm.base_url.clone(),
        settings.llm.chat_model.clone(),
    )?);

    // The transcription engine is a process-wide resource: built once here
    // and handed to the pipeline, never a hidden global.
    let provider = match settings.transcription.provider {
        TranscriptionProviderSetting::Local => TranscriptionProvider::Local,
        TranscriptionProviderSetting::OpenAi => TranscriptionProvider::OpenAi,
    };
    let transcriber = TranscriptionEngineFactory::create(
        provider,
        &settings.transcription.model,
        Some(settings.llm.api_key.clone()),
        settings.llm.base_url.clone(),
    )?;

    let audio_fetcher = AudioFetcher::new(
        Arc::clone(&crm),
        Arc::clone(&downloader),
        Arc::clone(&media_store),
    );
    let analyzer = CallAnalyzer::new(Arc::clone(&chat));
    let publisher = CommentPublisher::new(Arc::clone(&crm));

    let pipeline = Arc::new(WebhookPipeline::new(
        Arc::clone(&crm),
        audio_fetcher,
        transcriber,
        analyzer,
        publisher,
    ));

    let router = create_router(AppState { pipeline });

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
