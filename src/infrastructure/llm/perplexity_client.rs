use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::application::ports::{
    ChatProvider, ChatProviderError, ChatTurn, ContentPart, ExchangeOptions, ProviderReply,
    ReplyChunk,
};
use crate::presentation::config::ProviderSettings;

pub struct PerplexityClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(flatten)]
    options: &'a ExchangeOptions,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: Vec<WireContent<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireContent<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: WireImageUrl<'a> },
}

#[derive(Serialize)]
struct WireImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    images: Vec<ResponseImage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseImage {
    Url(String),
    Described { image_url: String },
}

impl ResponseImage {
    fn into_url(self) -> String {
        match self {
            ResponseImage::Url(url) => url,
            ResponseImage::Described { image_url } => image_url,
        }
    }
}

impl PerplexityClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.perplexity.ai";

    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ChatProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatProviderError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ChatProviderError> {
        Self::new(
            &settings.base_url,
            &settings.api_key,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn build_messages(turns: &[ChatTurn]) -> Vec<WireMessage<'_>> {
        turns
            .iter()
            .map(|turn| WireMessage {
                role: turn.role.as_str(),
                content: turn
                    .content
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text(text) => WireContent::Text { text },
                        ContentPart::Image(url) => WireContent::ImageUrl {
                            image_url: WireImageUrl { url },
                        },
                    })
                    .collect(),
            })
            .collect()
    }
}

#[async_trait]
impl ChatProvider for PerplexityClient {
    #[instrument(skip(self, turns, model, options), fields(model = %model, turns = turns.len()))]
    async fn send(
        &self,
        turns: &[ChatTurn],
        model: &str,
        options: &ExchangeOptions,
    ) -> Result<ProviderReply, ChatProviderError> {
        let request_body = CompletionRequest {
            model,
            messages: Self::build_messages(turns),
            options,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ChatProviderError::Unexpected(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Provider rate limit exceeded");
            return Err(ChatProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::error!(status = status.as_u16(), error = %message, "Provider request failed");
            return Err(
                if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
                    ChatProviderError::InvalidRequest(message)
                } else {
                    ChatProviderError::ProviderError {
                        status: status.as_u16(),
                        message,
                    }
                },
            );
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatProviderError::Unexpected(format!("invalid response: {}", e)))?;

        let images: Vec<String> = completion
            .images
            .into_iter()
            .map(ResponseImage::into_url)
            .collect();
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        Ok(reply_from_content(content, images))
    }
}

fn reply_from_content(content: Option<Value>, images: Vec<String>) -> ProviderReply {
    let images = if images.is_empty() { None } else { Some(images) };

    match content {
        None | Some(Value::Null) => ProviderReply::StructuredSingle {
            content: None,
            images,
        },
        Some(Value::String(text)) => match images {
            Some(images) => ProviderReply::StructuredSingle {
                content: Some(text),
                images: Some(images),
            },
            None => ProviderReply::PlainText(text),
        },
        Some(Value::Array(items)) => {
            let mut chunks: Vec<ReplyChunk> = items.iter().map(chunk_from_value).collect();
            if images.is_some() {
                chunks.push(ReplyChunk {
                    images,
                    ..ReplyChunk::default()
                });
            }
            ProviderReply::ChunkList(chunks)
        }
        Some(Value::Object(map)) => {
            let chunk = chunk_from_value(&Value::Object(map));
            let content = chunk.body().map(str::to_string);
            let mut all_images = chunk.images.unwrap_or_default();
            all_images.extend(images.unwrap_or_default());
            ProviderReply::StructuredSingle {
                content,
                images: Some(all_images),
            }
        }
        Some(other) => ProviderReply::PlainText(other.to_string()),
    }
}

// Accepts both `{type: "text", text}` / `{type: "image_url", image_url}` parts
// and looser `{content, images}` objects.
fn chunk_from_value(value: &Value) -> ReplyChunk {
    match value {
        Value::String(text) => ReplyChunk {
            content: Some(text.clone()),
            ..ReplyChunk::default()
        },
        Value::Object(map) => {
            let mut images: Vec<String> = map
                .get("images")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| match item {
                            Value::String(url) => Some(url.clone()),
                            Value::Object(obj) => obj
                                .get("image_url")
                                .and_then(Value::as_str)
                                .map(str::to_string),
                            _ => None,
                        })
                        .collect()
                })
                .unwrap_or_default();

            match map.get("image_url") {
                Some(Value::String(url)) => images.push(url.clone()),
                Some(Value::Object(obj)) => {
                    if let Some(url) = obj.get("url").and_then(Value::as_str) {
                        images.push(url.to_string());
                    }
                }
                _ => {}
            }

            ReplyChunk {
                content: map.get("content").and_then(Value::as_str).map(str::to_string),
                text: map.get("text").and_then(Value::as_str).map(str::to_string),
                images: if images.is_empty() { None } else { Some(images) },
            }
        }
        _ => ReplyChunk::default(),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("detail"))
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}
