use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ConversationId, Message};

pub const DEFAULT_TITLE: &str = "New Conversation";

/// A titled, ordered chat history.
///
/// `messages` is append-only and its order is the turn order replayed to the
/// provider on every exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub model_used: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(title: Option<String>, model_used: String, messages: Vec<Message>) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Self {
            id: ConversationId::new(),
            title,
            model_used,
            created_at: Utc::now(),
            messages,
        }
    }

    pub fn append(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    /// Returns up to `n` of the most recent messages in chronological order.
    pub fn last_messages(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }
}
