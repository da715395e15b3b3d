use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use crate::application::ports::ChatProvider;
use crate::domain::{Conversation, Message};
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::multipart_form::parse_conversation_id;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub model_used: Option<String>,
}

#[derive(Deserialize)]
pub struct RenameConversationRequest {
    pub title: String,
}

#[derive(Serialize)]
pub struct ConversationResponse {
    pub success: bool,
    pub conversation: Conversation,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|e| {
        tracing::warn!(error = %e, "Rejected request body");
        ApiError::bad_request(e.body_text())
    })
}

#[tracing::instrument(skip(state, body))]
pub async fn create_conversation_handler<P>(
    State(state): State<AppState<P>>,
    body: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<Json<ConversationResponse>, ApiError>
where
    P: ChatProvider + 'static,
{
    let request = json_body(body)?;
    let model_used = request
        .model_used
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.chat_service.default_model().to_string());

    let conversation = Conversation::new(request.title, model_used, request.messages);
    state
        .conversation_repository
        .create_conversation(&conversation)
        .await?;

    tracing::info!(conversation_id = %conversation.id, "Conversation created");

    Ok(Json(ConversationResponse {
        success: true,
        conversation,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn list_conversations_handler<P>(
    State(state): State<AppState<P>>,
) -> Result<Json<Vec<Conversation>>, ApiError>
where
    P: ChatProvider + 'static,
{
    let conversations = state.conversation_repository.list_conversations().await?;
    Ok(Json(conversations))
}

/// `PATCH /api/conversation/{id}`. An unknown id is reported as 404, not 500.
#[tracing::instrument(skip(state, body))]
pub async fn rename_conversation_handler<P>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
    body: Result<Json<RenameConversationRequest>, JsonRejection>,
) -> Result<Json<ConversationResponse>, ApiError>
where
    P: ChatProvider + 'static,
{
    let id = parse_conversation_id(&id)?;
    let request = json_body(body)?;
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("Title must not be empty"));
    }

    let conversation = state
        .conversation_repository
        .rename_conversation(id, title)
        .await?;

    Ok(Json(ConversationResponse {
        success: true,
        conversation,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn delete_conversation_handler<P>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError>
where
    P: ChatProvider + 'static,
{
    let id = parse_conversation_id(&id)?;
    state.conversation_repository.delete_conversation(id).await?;

    tracing::info!(conversation_id = %id, "Conversation deleted");

    Ok(Json(DeleteResponse {
        success: true,
        message: "Conversation deleted".to_string(),
    }))
}
