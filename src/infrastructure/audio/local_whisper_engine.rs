use std::path::Path;

use async_trait::async_trait;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::audio_decoder::decode_audio_file;

/// Local Whisper engine over a GGML model file. The context is loaded once
/// at startup and shared; each transcription creates its own inference
/// state, so concurrent requests do not contend on mutable model state.
pub struct LocalWhisperEngine {
    context: WhisperContext,
}

impl LocalWhisperEngine {
    pub fn new(model_path: &Path) -> Result<Self, TranscriptionError> {
        if !model_path.exists() {
            return Err(TranscriptionError::ModelLoadFailed(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        let path_str = model_path.to_str().ok_or_else(|| {
            TranscriptionError::ModelLoadFailed("model path is not valid UTF-8".to_string())
        })?;

        tracing::info!(model = %model_path.display(), "Loading Whisper model");

        let context =
            WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
                .map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;

        tracing::info!("Whisper model loaded");

        Ok(Self { context })
    }

    fn run_inference(&self, pcm: &[f32]) -> Result<String, TranscriptionError> {
        let mut state = self
            .context
            .create_state()
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("state: {}", e)))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_translate(false);
        params.set_print_realtime(false);
        params.set_print_progress(false);

        state
            .full(params, pcm)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let num_segments = state.full_n_segments();
        let mut transcript = String::new();

        for i in 0..num_segments {
            if let Some(segment) = state.get_segment(i) {
                let text = segment.to_str_lossy().map_err(|e| {
                    TranscriptionError::TranscriptionFailed(format!("segment text: {}", e))
                })?;
                if !transcript.is_empty() {
                    transcript.push(' ');
                }
                transcript.push_str(text.trim());
            }
        }

        Ok(transcript)
    }
}

#[async_trait]
impl TranscriptionEngine for LocalWhisperEngine {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        // The fetcher already validated the artifact; re-check anyway since
        // the file lives on a shared directory.
        if !audio_path.exists() {
            return Err(TranscriptionError::FileNotFound(
                audio_path.display().to_string(),
            ));
        }

        tracing::info!(path = %audio_path.display(), "Transcribing recording locally");

        let pcm = decode_audio_file(audio_path)?;
        let transcript = self.run_inference(&pcm)?;

        tracing::info!(chars = transcript.len(), "Local transcription completed");

        Ok(transcript)
    }
}
