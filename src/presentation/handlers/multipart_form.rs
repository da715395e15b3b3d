use std::collections::HashMap;

use axum::extract::Multipart;

use crate::application::ports::RepositoryError;
use crate::application::services::UploadedImage;
use crate::domain::ConversationId;

use super::error::ApiError;

/// Text fields plus at most one file field of a multipart body.
pub struct MultipartForm {
    fields: HashMap<String, String>,
    file: Option<UploadedImage>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, ApiError> {
        let mut fields = HashMap::new();
        let mut file = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read multipart");
                    return Err(ApiError::bad_request(format!(
                        "Failed to read multipart: {}",
                        e
                    )));
                }
            };

            let name = field.name().unwrap_or_default().to_string();
            if name == file_field {
                let file_name = field.file_name().map(str::to_string);
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "Failed to read uploaded file");
                    ApiError::bad_request(format!("Failed to read file: {}", e))
                })?;

                // Browsers send an empty part when no file was picked.
                if data.is_empty() {
                    continue;
                }

                tracing::debug!(mime = %mime, bytes = data.len(), "File received");
                file = Some(UploadedImage {
                    data,
                    mime,
                    file_name,
                });
            } else {
                let value = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read field {}: {}", name, e))
                })?;
                fields.insert(name, value);
            }
        }

        Ok(Self { fields, file })
    }

    /// Non-empty value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn take_file(&mut self) -> Option<UploadedImage> {
        self.file.take()
    }

    pub fn conversation_id(&self) -> Result<Option<ConversationId>, ApiError> {
        self.text("conversationId")
            .map(parse_conversation_id)
            .transpose()
    }

    pub fn string_list(&self, name: &str) -> Result<Option<Vec<String>>, ApiError> {
        self.text(name)
            .map(|raw| {
                serde_json::from_str::<Vec<String>>(raw).map_err(|_| {
                    ApiError::bad_request(format!("{} must be a JSON array of strings", name))
                })
            })
            .transpose()
    }

    pub fn flag(&self, name: &str, default: bool) -> Result<bool, ApiError> {
        match self.text(name).map(|v| v.trim().to_lowercase()) {
            None => Ok(default),
            Some(v) if v == "true" || v == "1" => Ok(true),
            Some(v) if v == "false" || v == "0" => Ok(false),
            Some(v) => Err(ApiError::bad_request(format!(
                "{} must be true or false, got {}",
                name, v
            ))),
        }
    }
}

pub fn parse_conversation_id(raw: &str) -> Result<ConversationId, ApiError> {
    raw.parse::<ConversationId>()
        .map_err(|_| RepositoryError::InvalidId(raw.to_string()).into())
}
