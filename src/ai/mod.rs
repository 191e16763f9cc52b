//! Multimodal model integration
//!
//! Sends the take-off request to an OpenRouter-compatible chat-completions
//! gateway and reports either the reply text or the failed HTTP exchange.

pub mod mime;
pub mod mock;
pub mod openrouter;

pub use mock::MockChatClient;
pub use openrouter::OpenRouterChatClient;

use crate::models::Credential;
use crate::Result;
use async_trait::async_trait;
use openrouter::ChatCompletionRequest;

/// Result of one completed HTTP exchange with the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Status 200; first choice's message text.
    Reply(String),
    /// Any other status, with the raw response body.
    HttpError { status: u16, body: String },
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn complete(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatOutcome>;
}
