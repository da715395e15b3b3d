mod conversation;
mod conversation_id;
mod image_format;
mod message;
mod message_role;

pub use conversation::{Conversation, DEFAULT_TITLE};
pub use conversation_id::ConversationId;
pub use image_format::ImageFormat;
pub use message::Message;
pub use message_role::MessageRole;
