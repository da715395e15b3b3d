use async_trait::async_trait;

use crate::domain::{Conversation, ConversationId, Message};

use super::RepositoryError;

/// Persistence for conversations and their embedded messages.
///
/// A conversation and all of its messages are always read and written as one
/// record, so deleting a conversation never leaves messages behind.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn create_conversation(&self, conversation: &Conversation)
    -> Result<(), RepositoryError>;

    /// Newest first.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError>;

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError>;

    async fn rename_conversation(
        &self,
        id: ConversationId,
        title: &str,
    ) -> Result<Conversation, RepositoryError>;

    async fn delete_conversation(&self, id: ConversationId) -> Result<(), RepositoryError>;

    /// Overwrites the stored message history with `conversation.messages`.
    async fn save_messages(&self, conversation: &Conversation) -> Result<(), RepositoryError>;

    async fn append_messages(
        &self,
        mut conversation: Conversation,
        messages: Vec<Message>,
    ) -> Result<Conversation, RepositoryError> {
        conversation.append(messages);
        self.save_messages(&conversation).await?;
        Ok(conversation)
    }
}
