use std::env;

use config::{Config, File};
use config::Environment as EnvironmentSource;

use super::{Environment, Settings, SettingsError};

// Variable names used by existing deployments, mapped onto their settings keys.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("PERPLEXITY_API_KEY", "provider.api_key"),
    ("MONGODB_URI", "database.url"),
    ("DATABASE_URL", "database.url"),
    ("CLOUDINARY_CLOUD_NAME", "media.cloud_name"),
    ("CLOUDINARY_API_KEY", "media.api_key"),
    ("CLOUDINARY_API_SECRET", "media.api_secret"),
];

/// Loads settings from `appsettings.{environment}`, `APP_*` variables and
/// legacy variables, in increasing precedence, then validates them.
pub fn load_settings(environment: Environment) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5001_i64)?
        .set_default("server.max_upload_mb", 10_i64)?
        .set_default("database.url", "")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("provider.api_key", "")?
        .set_default("provider.base_url", "https://api.perplexity.ai")?
        .set_default("provider.default_model", "sonar")?
        .set_default("provider.timeout_secs", 120_i64)?
        .set_default("media.provider", "cloudinary")?
        .set_default("media.api_base", "https://api.cloudinary.com")?
        .set_default("media.folder", "chat_images")?
        .set_default("media.max_dimension", 800_i64)?
        .set_default("logging.json", false)?
        .add_source(
            File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                .required(false),
        )
        .add_source(
            EnvironmentSource::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    // DATABASE_URL wins over MONGODB_URI because it is listed later.
    for (variable, key) in LEGACY_VARIABLES {
        builder = builder.set_override_option(*key, env::var(variable).ok())?;
    }

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
