use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::ai::ChatOutcome;
use crate::models::{Credential, DEFAULT_BASE_URL};
use crate::{Error, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub struct OpenRouterHttpClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl OpenRouterHttpClient {
    /// Build a client. With `timeout` unset a request may wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// POST a chat completion. Any status other than 200 comes back as
    /// [`ChatOutcome::HttpError`] rather than an `Err`.
    pub async fn chat_completion(
        &self,
        credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatOutcome> {
        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH);
        tracing::debug!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to OpenRouter: {}", e);
                e
            })?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!("OpenRouter API error (status {}): {}", status, body);
            return Ok(ChatOutcome::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse OpenRouter response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse OpenRouter response: {}", e))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No choices in OpenRouter response".to_string()))?;

        if let Some(reason) = choice.finish_reason.as_deref() {
            tracing::debug!("Completion finished with reason: {}", reason);
        }

        choice
            .message
            .content
            .map(ChatOutcome::Reply)
            .ok_or_else(|| Error::AiProvider("No text content in OpenRouter reply".to_string()))
    }
}
