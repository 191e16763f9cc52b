//! Blueprint take-off: send engineering-drawing images to a multimodal model
//!
//! Collects a credential and a batch of drawing images, asks the model for a
//! quantity take-off, and renders the reply as a markdown table.

pub mod ai;
pub mod app;
pub mod display;
pub mod error;
pub mod intake;
pub mod models;
pub mod postprocess;
pub mod prompts;
pub mod request;
pub mod response;

pub use error::{Error, Result, ValidationError};
