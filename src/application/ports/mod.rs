mod chat_provider;
mod chat_turn;
mod conversation_repository;
mod exchange_options;
mod media_host;
mod provider_reply;
mod repository_error;

pub use chat_provider::{ChatProvider, ChatProviderError};
pub use chat_turn::{ChatTurn, ContentPart};
pub use conversation_repository::ConversationRepository;
pub use exchange_options::{ExchangeOptions, SearchRecency};
pub use media_host::{MediaError, MediaHost};
pub use provider_reply::{ExchangeReply, ProviderReply, ReplyChunk};
pub use repository_error::RepositoryError;
