use std::sync::Arc;

use crate::application::ports::{ChatProvider, ConversationRepository};
use crate::application::services::ChatService;

pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState<P>
where
    P: ChatProvider,
{
    pub chat_service: Arc<ChatService<P>>,
    pub conversation_repository: Arc<dyn ConversationRepository>,
    pub upload_limit_bytes: usize,
}

impl<P> AppState<P>
where
    P: ChatProvider,
{
    pub fn new(
        chat_service: Arc<ChatService<P>>,
        conversation_repository: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            chat_service,
            conversation_repository,
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit_bytes = bytes;
        self
    }
}

impl<P> Clone for AppState<P>
where
    P: ChatProvider,
{
    fn clone(&self) -> Self {
        Self {
            chat_service: Arc::clone(&self.chat_service),
            conversation_repository: Arc::clone(&self.conversation_repository),
            upload_limit_bytes: self.upload_limit_bytes,
        }
    }
}
