use async_trait::async_trait;

use super::{ChatTurn, ExchangeOptions, ExchangeReply, ProviderReply};

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn send(
        &self,
        turns: &[ChatTurn],
        model: &str,
        options: &ExchangeOptions,
    ) -> Result<ProviderReply, ChatProviderError>;

    async fn exchange(
        &self,
        turns: &[ChatTurn],
        model: &str,
        options: &ExchangeOptions,
    ) -> Result<ExchangeReply, ChatProviderError> {
        let reply = self.send(turns, model, options).await?;
        Ok(reply.normalize())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatProviderError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("rate limited, retry later")]
    RateLimited,
    #[error("provider error {status}: {message}")]
    ProviderError { status: u16, message: String },
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ChatProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChatProviderError::RateLimited)
    }
}
