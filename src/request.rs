//! Request assembly
//!
//! Turns a validated batch of images into the single chat message (and the
//! request body around it) sent to the gateway.

use crate::ai::mime::{flag_declared_mismatch, DECLARED_IMAGE_MIME};
use crate::ai::openrouter::{ChatCompletionRequest, ChatMessage, ContentPart, ImageDetail, ImageUrl};
use crate::models::UploadedImage;
use crate::{prompts, Error, Result};
use base64::Engine as _;

pub const TAKEOFF_MODEL: &str = "openai/gpt-4o";
pub const TAKEOFF_MAX_TOKENS: u32 = 500;

const BASE64_MARKER: &str = ";base64,";

/// Wrap raw bytes as a base64 data URI with the declared image MIME type.
pub fn encode_data_uri(bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{}{}{}", DECLARED_IMAGE_MIME, BASE64_MARKER, encoded)
}

/// Recover the raw bytes from a base64 data URI of any declared type.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(BASE64_MARKER))
        .map(|(_, payload)| payload)
        .ok_or_else(|| Error::DataUri(format!("not a base64 data URI: {:.32}", uri)))?;

    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

/// One instruction part followed by one image part per upload, in order.
pub fn build_takeoff_message(images: &[UploadedImage]) -> ChatMessage {
    let mut content = Vec::with_capacity(images.len() + 1);
    content.push(ContentPart::Text {
        text: prompts::TAKEOFF_INSTRUCTION.to_string(),
    });

    for image in images {
        // Declared type is always image/jpeg; only flag it.
        flag_declared_mismatch(&image.name, &image.bytes);
        tracing::debug!("Attaching {} ({} bytes)", image.name, image.bytes.len());
        content.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: encode_data_uri(&image.bytes),
                detail: ImageDetail::Low,
            },
        });
    }

    ChatMessage {
        role: "user".to_string(),
        content,
    }
}

pub fn build_request(message: ChatMessage) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: TAKEOFF_MODEL.to_string(),
        messages: vec![message],
        max_tokens: TAKEOFF_MAX_TOKENS,
    }
}
