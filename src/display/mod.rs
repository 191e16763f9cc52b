//! Conversation display
//!
//! Echoes the outbound message (instruction text plus attached images) as the
//! user's bubble, then the model's reply as the assistant's bubble.

pub mod mock;
pub mod terminal;

pub use mock::{RecordingRenderer, RenderEvent};
pub use terminal::TerminalRenderer;

use crate::ai::openrouter::ChatMessage;
use crate::request::decode_data_uri;
use crate::Result;
use std::io::Cursor;

pub trait Renderer: Send + Sync {
    /// User-visible warning for an aborted submission.
    fn warn(&self, message: &str) -> Result<()>;
    fn render_user(&self, message: &ChatMessage) -> Result<()>;
    /// Reply text, rendered as markdown.
    fn render_assistant(&self, reply: &str) -> Result<()>;
}

/// What an attached image turned out to be once decoded from its data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPreview {
    pub byte_len: usize,
    pub format: Option<String>,
    pub dimensions: Option<(u32, u32)>,
}

impl AttachmentPreview {
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let bytes = decode_data_uri(uri)?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let (format, dimensions) = match image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
        {
            Ok(reader) => {
                let format = reader.format().map(|f| format!("{:?}", f).to_uppercase());
                let dimensions = reader.into_dimensions().ok();
                (format, dimensions)
            }
            Err(e) => {
                tracing::debug!("Could not sniff attachment format: {}", e);
                (None, None)
            }
        };

        Self {
            byte_len: bytes.len(),
            format,
            dimensions,
        }
    }

    pub fn summary(&self) -> String {
        match (&self.format, self.dimensions) {
            (Some(format), Some((w, h))) => {
                format!("{} {}x{}, {} bytes", format, w, h, self.byte_len)
            }
            (Some(format), None) => format!("{}, {} bytes", format, self.byte_len),
            (None, _) => format!("{} bytes, preview unavailable", self.byte_len),
        }
    }
}
