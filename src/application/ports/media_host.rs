use std::io;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::ImageFormat;

#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Uploads an image and returns a durable `http(s)` URL for it.
    async fn upload(&self, data: Bytes, format: ImageFormat) -> Result<String, MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("upload failed: {0}")]
    UploadFailed(String),
}
