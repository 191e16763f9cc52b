//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid data URI: {0}")]
    DataUri(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reasons a submission is rejected before any request is sent.
///
/// The `Display` text is shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("API Key required")]
    MissingCredential,

    #[error("Only .jpg, .png, .gif, or .webp are supported")]
    UnsupportedFileType { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
