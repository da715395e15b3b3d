mod chat_service;
mod conversation_locks;
mod media_resolver;
mod message_assembler;

pub use chat_service::{
    AttachImageRequest, AttachedImage, ChatError, ChatOutcome, ChatRequest, ChatService,
};
pub use conversation_locks::ConversationLocks;
pub use media_resolver::{
    AttachmentSource, MediaResolver, UploadedImage, embed_data_uri, is_hosted_url,
};
pub use message_assembler::{assemble_turn, assemble_turns};
