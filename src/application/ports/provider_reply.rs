/// Raw answer shapes a provider may hand back.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    PlainText(String),
    StructuredSingle {
        content: Option<String>,
        images: Option<Vec<String>>,
    },
    ChunkList(Vec<ReplyChunk>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyChunk {
    pub content: Option<String>,
    pub text: Option<String>,
    pub images: Option<Vec<String>>,
}

impl ReplyChunk {
    /// First non-blank of `content` and `text`.
    pub fn body(&self) -> Option<&str> {
        [&self.content, &self.text]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }
}

/// Canonical result of one exchange.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeReply {
    pub text: String,
    pub images: Option<Vec<String>>,
}

impl ProviderReply {
    pub fn normalize(self) -> ExchangeReply {
        match self {
            ProviderReply::PlainText(text) => ExchangeReply {
                text: text.trim().to_string(),
                images: None,
            },
            ProviderReply::StructuredSingle { content, images } => ExchangeReply {
                text: content.unwrap_or_default().trim().to_string(),
                images: collect_images(images.into_iter().flatten()),
            },
            ProviderReply::ChunkList(chunks) => {
                let mut parts = Vec::new();
                let mut images = Vec::new();
                for chunk in chunks {
                    if let Some(text) = chunk.body() {
                        parts.push(text.trim().to_string());
                    }
                    images.extend(chunk.images.into_iter().flatten());
                }
                ExchangeReply {
                    text: parts.join(" "),
                    images: collect_images(images),
                }
            }
        }
    }
}

// Order of first appearance wins; duplicates and blanks are dropped.
fn collect_images(images: impl IntoIterator<Item = String>) -> Option<Vec<String>> {
    let mut seen = Vec::new();
    for image in images {
        if !image.trim().is_empty() && !seen.contains(&image) {
            seen.push(image);
        }
    }
    if seen.is_empty() { None } else { Some(seen) }
}
