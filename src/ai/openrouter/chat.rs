use super::client::OpenRouterHttpClient;
use super::types::ChatCompletionRequest;
use crate::ai::{ChatOutcome, ChatService};
use crate::models::Credential;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenRouterChatClient {
    http: OpenRouterHttpClient,
}

impl OpenRouterChatClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            http: OpenRouterHttpClient::new(timeout)?,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ChatService for OpenRouterChatClient {
    async fn complete(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatOutcome> {
        tracing::info!(
            "Requesting take-off from {} ({} message part(s))",
            request.model,
            request
                .messages
                .iter()
                .map(|m| m.content.len())
                .sum::<usize>()
        );
        self.http.chat_completion(credential, request).await
    }
}
