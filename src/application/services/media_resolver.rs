use std::path::PathBuf;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use tracing::instrument;

use crate::application::ports::{MediaError, MediaHost};
use crate::domain::ImageFormat;

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    pub mime: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AttachmentSource {
    Hosted(String),
    Bytes { data: Bytes, mime: String },
    File { path: PathBuf, mime: String },
}

pub struct MediaResolver {
    host: Option<Arc<dyn MediaHost>>,
}

impl MediaResolver {
    pub fn new(host: Option<Arc<dyn MediaHost>>) -> Self {
        Self { host }
    }

    pub fn inline() -> Self {
        Self { host: None }
    }

    /// Stores an upload with the media host when one is configured and
    /// returns the reference to keep on the message.
    #[instrument(skip(self, upload), fields(mime = %upload.mime, bytes = upload.data.len()))]
    pub async fn attach(&self, upload: UploadedImage) -> Result<String, MediaError> {
        let format = accepted_format(&upload.mime)?;

        let source = match &self.host {
            Some(host) => AttachmentSource::Hosted(host.upload(upload.data, format).await?),
            None => AttachmentSource::Bytes {
                data: upload.data,
                mime: upload.mime,
            },
        };

        self.resolve(source).await
    }

    pub async fn resolve(&self, source: AttachmentSource) -> Result<String, MediaError> {
        match source {
            AttachmentSource::Hosted(url) => {
                if is_hosted_url(&url) {
                    Ok(url)
                } else {
                    Err(MediaError::UnsupportedMedia(format!(
                        "not an http(s) reference: {}",
                        url
                    )))
                }
            }
            AttachmentSource::Bytes { data, mime } => {
                let format = accepted_format(&mime)?;
                Ok(embed_data_uri(&data, format))
            }
            AttachmentSource::File { path, mime } => {
                let format = accepted_format(&mime)?;
                let data = tokio::fs::read(&path).await?;
                Ok(embed_data_uri(&data, format))
            }
        }
    }
}

pub fn embed_data_uri(data: &[u8], format: ImageFormat) -> String {
    let b64 = general_purpose::STANDARD.encode(data);
    format!("data:{};base64,{}", format.as_mime(), b64)
}

pub fn is_hosted_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

fn accepted_format(mime: &str) -> Result<ImageFormat, MediaError> {
    ImageFormat::from_mime(mime)
        .ok_or_else(|| MediaError::UnsupportedMedia(format!("unsupported image type: {}", mime)))
}
