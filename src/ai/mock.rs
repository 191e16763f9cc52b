use super::openrouter::ChatCompletionRequest;
use super::{ChatOutcome, ChatService};
use crate::models::Credential;
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockChatClient {
    outcomes: Arc<Mutex<Vec<ChatOutcome>>>,
    requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_reply(self, reply: String) -> Self {
        self.outcomes.lock().unwrap().push(ChatOutcome::Reply(reply));
        self
    }

    pub fn with_http_error(self, status: u16, body: String) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(ChatOutcome::HttpError { status, body });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(
        &self,
        _credential: &Credential,
        request: &ChatCompletionRequest,
    ) -> Result<ChatOutcome> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.requests.lock().unwrap().push(request.clone());

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Default mock response
            Ok(ChatOutcome::Reply(
                "| Item | Quantity |\n| --- | --- |\n| Beam | 1 |\n".to_string(),
            ))
        } else {
            let index = (*count - 1) % outcomes.len();
            Ok(outcomes[index].clone())
        }
    }
}
