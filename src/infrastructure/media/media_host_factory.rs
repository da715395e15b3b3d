use std::sync::Arc;

use crate::application::ports::{MediaError, MediaHost};
use crate::presentation::config::{MediaProviderSetting, MediaSettings};

use super::cloudinary_host::CloudinaryMediaHost;

pub struct MediaHostFactory;

impl MediaHostFactory {
    /// `None` means uploads are embedded inline as data URIs.
    pub fn create(settings: &MediaSettings) -> Result<Option<Arc<dyn MediaHost>>, MediaError> {
        match settings.provider {
            MediaProviderSetting::Inline => Ok(None),
            MediaProviderSetting::Cloudinary => {
                let cloud_name = required(&settings.cloud_name, "cloud_name")?;
                let api_key = required(&settings.api_key, "api_key")?;
                let api_secret = required(&settings.api_secret, "api_secret")?;
                let host = CloudinaryMediaHost::new(
                    &settings.api_base,
                    cloud_name,
                    api_key,
                    api_secret,
                    &settings.folder,
                    settings.max_dimension,
                )?;
                Ok(Some(Arc::new(host)))
            }
        }
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, MediaError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| MediaError::UploadFailed(format!("media.{} required for cloudinary", name)))
}
