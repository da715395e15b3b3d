use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::instrument;

use crate::application::ports::{MediaError, MediaHost};
use crate::domain::ImageFormat;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Signed uploads to a Cloudinary account.
pub struct CloudinaryMediaHost {
    client: Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
    max_dimension: u32,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct UploadErrorBody {
    error: UploadErrorDetail,
}

#[derive(Deserialize)]
struct UploadErrorDetail {
    message: String,
}

impl CloudinaryMediaHost {
    pub const DEFAULT_API_BASE: &'static str = "https://api.cloudinary.com";

    pub fn new(
        api_base: &str,
        cloud_name: &str,
        api_key: &str,
        api_secret: &str,
        folder: &str,
        max_dimension: u32,
    ) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            folder: folder.to_string(),
            max_dimension,
        })
    }

    fn transformation(&self) -> String {
        format!("c_limit,h_{0},w_{0}", self.max_dimension)
    }

    /// Signature over the alphabetically sorted upload parameters.
    pub fn sign(params: &[(&str, String)], api_secret: &str) -> String {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let to_sign = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        format!("{:x}", Sha1::digest(format!("{}{}", to_sign, api_secret)))
    }
}

#[async_trait]
impl MediaHost for CloudinaryMediaHost {
    #[instrument(skip(self, data), fields(bytes = data.len(), format = ?format))]
    async fn upload(&self, data: Bytes, format: ImageFormat) -> Result<String, MediaError> {
        let params = vec![
            ("folder", self.folder.clone()),
            ("format", format.extension().to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
            ("transformation", self.transformation()),
        ];
        let signature = Self::sign(&params, &self.api_secret);

        let file = Part::bytes(data.to_vec())
            .file_name(format!("upload.{}", format.extension()))
            .mime_str(format.as_mime())
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(format!(
                "{}/v1_1/{}/image/upload",
                self.api_base, self.cloud_name
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UploadErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(MediaError::UploadFailed(format!(
                "HTTP {}: {}",
                status, message
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::UploadFailed(e.to_string()))?;

        let url = uploaded
            .secure_url
            .or(uploaded.url)
            .ok_or_else(|| MediaError::UploadFailed("response carried no url".to_string()))?;

        tracing::info!(url = %url, "Image uploaded");
        Ok(url)
    }
}
