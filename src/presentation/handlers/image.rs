use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::application::ports::ChatProvider;
use crate::application::services::AttachImageRequest;
use crate::domain::Message;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::multipart_form::MultipartForm;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub message: Message,
    pub image_url: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn image_handler<P>(
    State(state): State<AppState<P>>,
    multipart: Multipart,
) -> Result<Json<ImageResponse>, ApiError>
where
    P: ChatProvider + 'static,
{
    let mut form = MultipartForm::read(multipart, "image").await?;

    let image = form
        .take_file()
        .ok_or_else(|| ApiError::bad_request("No image uploaded"))?;
    let conversation_id = form
        .conversation_id()?
        .ok_or_else(|| ApiError::bad_request("conversationId is required"))?;

    let attached = state
        .chat_service
        .attach_image(AttachImageRequest {
            conversation_id,
            image,
            text: form.text("text").map(str::to_string),
            is_user: form.flag("isUser", true)?,
            model: form.text("modelUsed").map(str::to_string),
        })
        .await?;

    tracing::info!(conversation_id = %conversation_id, "Image attached");

    Ok(Json(ImageResponse {
        message: attached.message,
        image_url: attached.image_url,
    }))
}
