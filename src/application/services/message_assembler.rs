use crate::application::ports::{ChatTurn, ContentPart};
use crate::domain::Message;

/// Builds the provider-facing turn list from a stored history.
///
/// Output order matches `messages` exactly. A message without text or image
/// still yields a turn, with an empty content list.
pub fn assemble_turns(messages: &[Message]) -> Vec<ChatTurn> {
    messages.iter().map(assemble_turn).collect()
}

pub fn assemble_turn(message: &Message) -> ChatTurn {
    let mut content = Vec::with_capacity(2);
    if !message.text.is_empty() {
        content.push(ContentPart::Text(message.text.clone()));
    }
    if let Some(url) = &message.image_url {
        content.push(ContentPart::Image(url.clone()));
    }

    ChatTurn {
        role: message.role(),
        content,
    }
}
