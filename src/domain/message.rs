use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MessageRole;

/// One turn of a conversation.
///
/// `image_url` carries an image the sender attached; `images` carries the
/// references the provider returned alongside its answer. The two are never
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub text: String,
    pub is_user: bool,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub model_used: String,
}

impl Message {
    pub fn user(text: String, image_url: Option<String>, model_used: String) -> Self {
        Self {
            text,
            is_user: true,
            timestamp: Utc::now(),
            image_url,
            images: None,
            model_used,
        }
    }

    pub fn assistant(text: String, images: Option<Vec<String>>, model_used: String) -> Self {
        Self {
            text,
            is_user: false,
            timestamp: Utc::now(),
            image_url: None,
            images: images.filter(|i| !i.is_empty()),
            model_used,
        }
    }

    pub fn role(&self) -> MessageRole {
        MessageRole::from_is_user(self.is_user)
    }

    pub fn has_content(&self) -> bool {
        !self.text.is_empty() || self.image_url.is_some()
    }
}
