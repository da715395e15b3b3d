use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::{
    ChatProvider, ChatProviderError, ConversationRepository, ExchangeOptions, MediaError,
    RepositoryError,
};
use crate::domain::{Conversation, ConversationId, Message};

use super::conversation_locks::ConversationLocks;
use super::media_resolver::{MediaResolver, UploadedImage};
use super::message_assembler::assemble_turns;

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub conversation_id: Option<ConversationId>,
    pub text: Option<String>,
    pub image: Option<UploadedImage>,
    pub model: Option<String>,
    pub options: ExchangeOptions,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone)]
pub struct AttachImageRequest {
    pub conversation_id: ConversationId,
    pub image: UploadedImage,
    pub text: Option<String>,
    pub is_user: bool,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AttachedImage {
    pub message: Message,
    pub image_url: String,
}

/// Runs one chat turn: stores the user message, replays the history to the
/// provider and stores the answer.
///
/// The user message is persisted before the provider is called, so a failed
/// exchange never loses what the user sent.
pub struct ChatService<P>
where
    P: ChatProvider,
{
    repository: Arc<dyn ConversationRepository>,
    provider: Arc<P>,
    media: MediaResolver,
    locks: ConversationLocks,
    default_model: String,
}

impl<P> ChatService<P>
where
    P: ChatProvider,
{
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        provider: Arc<P>,
        media: MediaResolver,
        default_model: String,
    ) -> Self {
        Self {
            repository,
            provider,
            media,
            locks: ConversationLocks::new(),
            default_model,
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(
        skip(self, request),
        fields(conversation_id = ?request.conversation_id, has_image = request.image.is_some())
    )]
    pub async fn send(&self, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        let text = request.text.unwrap_or_default();
        if text.is_empty() && request.image.is_none() {
            return Err(ChatError::InvalidInput("Text or image required".to_string()));
        }

        let model = self.model_or_default(request.model);
        tracing::debug!(model = %model, "Processing chat turn");

        let image_url = match request.image {
            Some(image) => Some(self.media.attach(image).await?),
            None => None,
        };
        let user_message = Message::user(text, image_url, model.clone());

        let existing = match request.conversation_id {
            Some(id) => {
                let guard = self.locks.lock(id).await;
                self.repository
                    .get_conversation(id)
                    .await?
                    .map(|conversation| (conversation, guard))
            }
            None => None,
        };

        let (conversation, _guard) = match existing {
            Some((conversation, guard)) => {
                let conversation = self
                    .repository
                    .append_messages(conversation, vec![user_message])
                    .await?;
                (conversation, Some(guard))
            }
            None => {
                let conversation = Conversation::new(None, model.clone(), vec![user_message]);
                self.repository.create_conversation(&conversation).await?;
                tracing::info!(conversation_id = %conversation.id, "Conversation created");
                (conversation, None)
            }
        };

        let turns = assemble_turns(&conversation.messages);
        let options = request.options.with_images();

        let reply = match self.provider.exchange(&turns, &model, &options).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    conversation_id = %conversation.id,
                    "Provider exchange failed, user message kept"
                );
                return Err(ChatError::Provider(e));
            }
        };

        let assistant_message = Message::assistant(reply.text, reply.images, model);
        let conversation = self
            .repository
            .append_messages(conversation, vec![assistant_message])
            .await?;

        tracing::info!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            "Chat turn completed"
        );

        Ok(ChatOutcome {
            conversation_id: conversation.id,
            messages: conversation.last_messages(2).to_vec(),
        })
    }

    #[instrument(skip(self, request), fields(conversation_id = %request.conversation_id))]
    pub async fn attach_image(
        &self,
        request: AttachImageRequest,
    ) -> Result<AttachedImage, ChatError> {
        let _guard = self.locks.lock(request.conversation_id).await;

        let conversation = self
            .repository
            .get_conversation(request.conversation_id)
            .await?
            .ok_or(ChatError::NotFound(request.conversation_id))?;

        let image_url = self.media.attach(request.image).await?;
        let model = request
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| conversation.model_used.clone());

        let mut message = Message::user(
            request.text.unwrap_or_default(),
            Some(image_url.clone()),
            model,
        );
        message.is_user = request.is_user;

        self.repository
            .append_messages(conversation, vec![message.clone()])
            .await?;

        Ok(AttachedImage { message, image_url })
    }

    fn model_or_default(&self, model: Option<String>) -> String {
        model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.default_model.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("conversation not found: {0}")]
    NotFound(ConversationId),
    #[error("media: {0}")]
    Media(#[from] MediaError),
    #[error("provider: {0}")]
    Provider(#[from] ChatProviderError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
