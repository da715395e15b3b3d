mod chat;
mod conversations;
mod error;
mod health;
mod image;
mod multipart_form;

pub use chat::{ChatResponse, chat_handler};
pub use conversations::{
    create_conversation_handler, delete_conversation_handler, list_conversations_handler,
    rename_conversation_handler,
};
pub use error::{ApiError, ErrorResponse};
pub use health::{health_handler, root_handler};
pub use image::{ImageResponse, image_handler};
