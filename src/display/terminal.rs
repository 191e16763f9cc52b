use super::{AttachmentPreview, Renderer};
use crate::ai::openrouter::{ChatMessage, ContentPart};
use crate::Result;
use std::io::{self, Write};
use std::sync::Mutex;

/// Plain-text conversation renderer for a terminal or any other writer.
pub struct TerminalRenderer<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_block(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn bubble_header(role: &str) -> String {
    format!("── {} ──\n", role)
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn warn(&self, message: &str) -> Result<()> {
        self.write_block(&format!("⚠ {}\n", message))
    }

    fn render_user(&self, message: &ChatMessage) -> Result<()> {
        let mut block = bubble_header(&message.role);
        for part in &message.content {
            match part {
                ContentPart::Text { text } => {
                    block.push_str(text);
                    block.push('\n');
                }
                ContentPart::ImageUrl { image_url } => {
                    let summary = match AttachmentPreview::from_data_uri(&image_url.url) {
                        Ok(preview) => preview.summary(),
                        Err(e) => {
                            tracing::warn!("Could not decode attached image: {}", e);
                            "unreadable".to_string()
                        }
                    };
                    block.push_str(&format!("▸ Attached Image ({})\n", summary));
                }
            }
        }
        block.push('\n');
        self.write_block(&block)
    }

    fn render_assistant(&self, reply: &str) -> Result<()> {
        // Empty replies get no bubble.
        if reply.is_empty() {
            return Ok(());
        }
        let mut block = bubble_header("assistant");
        block.push_str(reply);
        if !reply.ends_with('\n') {
            block.push('\n');
        }
        self.write_block(&block)
    }
}
