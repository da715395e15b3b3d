use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::application::ports::{ChatProvider, ExchangeOptions};
use crate::application::services::ChatRequest;
use crate::domain::{ConversationId, Message};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::multipart_form::MultipartForm;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
}

/// `POST /api/chat`: one user turn, optionally with an image.
///
/// The turn runs on its own task so a client disconnect does not abandon it
/// between the provider call and persistence.
#[tracing::instrument(skip(state, multipart))]
pub async fn chat_handler<P>(
    State(state): State<AppState<P>>,
    multipart: Multipart,
) -> Result<Json<ChatResponse>, ApiError>
where
    P: ChatProvider + 'static,
{
    let mut form = MultipartForm::read(multipart, "image").await?;
    tracing::debug!(
        prompt = %sanitize_prompt(form.text("text").unwrap_or_default()),
        "Processing chat request"
    );

    let options = ExchangeOptions {
        image_format_filter: form.string_list("imageFormatFilter")?,
        image_domain_filter: form.string_list("imageDomainFilter")?,
        ..ExchangeOptions::default()
    };

    let request = ChatRequest {
        conversation_id: form.conversation_id()?,
        text: form.text("text").map(str::to_string),
        model: form.text("modelUsed").map(str::to_string),
        image: form.take_file(),
        options,
    };

    let service = Arc::clone(&state.chat_service);
    let outcome = tokio::spawn(async move { service.send(request).await })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Chat task aborted");
            ApiError::internal("Chat failed")
        })??;

    Ok(Json(ChatResponse {
        success: true,
        conversation_id: outcome.conversation_id,
        messages: outcome.messages,
    }))
}
