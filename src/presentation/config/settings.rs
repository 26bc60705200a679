use std::path::PathBuf;

/// All runtime configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub crm: CrmSettings,
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
    pub media: MediaSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct CrmSettings {
    /// Bitrix24 inbound-webhook base URL, auth token included.
    pub webhook_base_url: String,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub chat_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionProviderSetting {
    Local,
    OpenAi,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    /// GGML model file path for `Local`, API model name for `OpenAi`.
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct MediaSettings {
    pub dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse().map_err(|e| SettingsError::Invalid {
                var: "SERVER_PORT",
                message: format!("{}", e),
            })?,
            Err(_) => 8000,
        };

        let provider = match std::env::var("TRANSCRIPTION_PROVIDER")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => TranscriptionProviderSetting::Local,
            "openai" => TranscriptionProviderSetting::OpenAi,
            other => {
                return Err(SettingsError::Invalid {
                    var: "TRANSCRIPTION_PROVIDER",
                    message: format!("{} (expected: local or openai)", other),
                })
            }
        };

        let model = match provider {
            TranscriptionProviderSetting::Local => std::env::var("WHISPER_MODEL_PATH")
                .unwrap_or_else(|_| "models/ggml-base.bin".to_string()),
            TranscriptionProviderSetting::OpenAi => {
                std::env::var("WHISPER_API_MODEL").unwrap_or_else(|_| "whisper-1".to_string())
            }
        };

        Ok(Self {
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            crm: CrmSettings {
                webhook_base_url: required("BITRIX24_WEBHOOK")?,
            },
            llm: LlmSettings {
                api_key: required("OPENAI_API_KEY")?,
                base_url: std::env::var("OPENAI_BASE_URL").ok(),
                chat_model: std::env::var("OPENAI_CHAT_MODEL")
                    .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            },
            transcription: TranscriptionSettings { provider, model },
            media: MediaSettings {
                dir: PathBuf::from(std::env::var("MEDIA_DIR").unwrap_or_else(|_| "media".to_string())),
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(SettingsError::MissingVar(name))
}
