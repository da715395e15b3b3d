use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub provider: ProviderSettings,
    pub media: MediaSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

const POSTGRES_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

impl DatabaseSettings {
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with("memory:")
    }

    pub fn is_postgres(&self) -> bool {
        POSTGRES_SCHEMES
            .iter()
            .any(|scheme| self.url.trim().starts_with(scheme))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    pub default_model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaProviderSetting {
    Cloudinary,
    Inline,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    pub provider: MediaProviderSetting,
    pub api_base: String,
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub folder: String,
    pub max_dimension: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Settings {
    /// Rejects configurations the server cannot start with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.provider.api_key.trim().is_empty() {
            return Err(SettingsError::Missing("provider.api_key (PERPLEXITY_API_KEY)"));
        }
        if self.database.url.trim().is_empty() {
            return Err(SettingsError::Missing("database.url (DATABASE_URL)"));
        }
        if !self.database.is_in_memory() && !self.database.is_postgres() {
            // Only the scheme is reported; the url may carry credentials.
            let scheme = self.database.url.split(':').next().unwrap_or_default();
            return Err(SettingsError::Invalid {
                key: "database.url (DATABASE_URL)",
                reason: format!(
                    "expected postgres://, postgresql:// or memory:, got {}:",
                    scheme.trim()
                ),
            });
        }
        if self.media.provider == MediaProviderSetting::Cloudinary {
            let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
            if blank(&self.media.cloud_name) {
                return Err(SettingsError::Missing("media.cloud_name (CLOUDINARY_CLOUD_NAME)"));
            }
            if blank(&self.media.api_key) {
                return Err(SettingsError::Missing("media.api_key (CLOUDINARY_API_KEY)"));
            }
            if blank(&self.media.api_secret) {
                return Err(SettingsError::Missing("media.api_secret (CLOUDINARY_API_SECRET)"));
            }
        }
        Ok(())
    }
}
