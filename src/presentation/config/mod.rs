mod environment;
mod loader;
mod settings;

pub use environment::Environment;
pub use loader::load_settings;
pub use settings::{
    DatabaseSettings, LoggingSettings, MediaProviderSetting, MediaSettings, ProviderSettings,
    ServerSettings, Settings, SettingsError,
};
