mod settings;

pub use settings::{
    CrmSettings, LlmSettings, MediaSettings, ServerSettings, Settings, SettingsError,
    TranscriptionProviderSetting, TranscriptionSettings,
};
