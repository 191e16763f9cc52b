use super::Renderer;
use crate::ai::openrouter::ChatMessage;
use crate::Result;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Warning(String),
    User(ChatMessage),
    Assistant(String),
}

/// Renderer that keeps every call for later inspection.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn get_warnings(&self) -> Vec<String> {
        self.get_events()
            .into_iter()
            .filter_map(|event| match event {
                RenderEvent::Warning(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: RenderEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn warn(&self, message: &str) -> Result<()> {
        self.record(RenderEvent::Warning(message.to_string()))
    }

    fn render_user(&self, message: &ChatMessage) -> Result<()> {
        self.record(RenderEvent::User(message.clone()))
    }

    fn render_assistant(&self, reply: &str) -> Result<()> {
        self.record(RenderEvent::Assistant(reply.to_string()))
    }
}
