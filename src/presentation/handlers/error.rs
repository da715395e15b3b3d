use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{ChatProviderError, MediaError, RepositoryError};
use crate::application::services::ChatError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

/// Failure returned by every handler; always rendered as a JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub retryable: Option<bool>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            retryable: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                success: false,
                error: self.message,
                retryable: self.retryable,
            }),
        )
            .into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(_) => ApiError::not_found("Conversation not found"),
            RepositoryError::InvalidId(id) => {
                ApiError::bad_request(format!("Invalid conversation id: {}", id))
            }
            other => {
                tracing::error!(error = %other, "Storage operation failed");
                ApiError::internal("Storage operation failed")
            }
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::UnsupportedMedia(reason) => ApiError::bad_request(reason),
            other => {
                tracing::error!(error = %other, "Image handling failed");
                ApiError::internal("Image upload failed")
            }
        }
    }
}

impl From<ChatProviderError> for ApiError {
    fn from(e: ChatProviderError) -> Self {
        let message = match &e {
            ChatProviderError::InvalidRequest(reason) => format!("Chat failed: {}", reason),
            ChatProviderError::RateLimited => "Chat failed: rate limit exceeded".to_string(),
            ChatProviderError::ProviderError { status, .. } => {
                format!("Chat failed: provider returned {}", status)
            }
            ChatProviderError::Unexpected(_) => "Chat failed: unexpected error".to_string(),
        };
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            retryable: Some(e.is_retryable()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::InvalidInput(reason) => ApiError::bad_request(reason),
            ChatError::NotFound(_) => ApiError::not_found("Conversation not found"),
            ChatError::Media(e) => e.into(),
            ChatError::Provider(e) => e.into(),
            ChatError::Repository(e) => e.into(),
        }
    }
}
