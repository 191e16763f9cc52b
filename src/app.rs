//! Application orchestration for one take-off submission.

use crate::ai::openrouter::ChatMessage;
use crate::ai::{ChatOutcome, ChatService, OpenRouterChatClient};
use crate::display::{Renderer, TerminalRenderer};
use crate::intake::{load_images, validate_paths, validate_submission};
use crate::models::{Config, Credential, Submission};
use crate::postprocess::{post_processor_for, ReplyPostProcessor};
use crate::request::{build_request, build_takeoff_message};
use crate::response::interpret_outcome;
use crate::{Result, ValidationError};
use std::path::Path;
use tracing::{error, info, warn};

/// Runs the validate → build → send → interpret → display sequence.
pub struct App {
    chat: Box<dyn ChatService>,
    renderer: Box<dyn Renderer>,
    post_processor: Box<dyn ReplyPostProcessor>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub renderer: Box<dyn Renderer>,
    pub post_processor: Box<dyn ReplyPostProcessor>,
}

/// What was sent and what came back for a completed submission.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub message: ChatMessage,
    /// HTTP status when the gateway did not answer with 200.
    pub error_status: Option<u16>,
    pub reply: String,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Rejected before any request was sent; the warning has been shown.
    Aborted(ValidationError),
    Completed(Transcript),
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            chat: services.chat,
            renderer: services.renderer,
            post_processor: services.post_processor,
        }
    }

    /// Construct an app that talks to the configured gateway and renders to
    /// stdout.
    pub fn new(config: &Config) -> Result<Self> {
        let chat =
            OpenRouterChatClient::new(config.timeout)?.with_base_url(config.base_url.clone());
        info!(
            "Gateway: {} (table normalization {})",
            config.base_url,
            if config.normalize_tables { "on" } else { "off" }
        );

        Ok(Self::with_services(AppServices {
            chat: Box::new(chat),
            renderer: Box::new(TerminalRenderer::stdout()),
            post_processor: post_processor_for(config.normalize_tables),
        }))
    }

    /// Check the credential and file names, then read the files and run.
    /// A rejected batch is never read from disk.
    pub async fn run_files<P: AsRef<Path>>(
        &self,
        credential: Credential,
        paths: &[P],
    ) -> Result<RunOutcome> {
        if let Err(reason) = validate_paths(&credential, paths) {
            return self.reject(reason);
        }

        let images = load_images(paths)?;
        self.run(Submission::new(credential, images)).await
    }

    pub async fn run(&self, submission: Submission) -> Result<RunOutcome> {
        let validated = match validate_submission(submission) {
            Ok(validated) => validated,
            Err(reason) => return self.reject(reason),
        };

        info!("Submitting {} image(s) for take-off", validated.images.len());
        let message = build_takeoff_message(&validated.images);
        let request = build_request(message.clone());

        let outcome = match self.chat.complete(&validated.credential, &request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Take-off request failed: {}", e);
                self.renderer.warn(&format!("Request failed: {}", e))?;
                return Err(e);
            }
        };

        let error_status = match &outcome {
            ChatOutcome::HttpError { status, .. } => Some(*status),
            ChatOutcome::Reply(_) => None,
        };
        let reply = interpret_outcome(outcome, self.post_processor.as_ref());

        self.renderer.render_user(&message)?;
        self.renderer.render_assistant(&reply)?;

        Ok(RunOutcome::Completed(Transcript {
            message,
            error_status,
            reply,
        }))
    }

    fn reject(&self, reason: ValidationError) -> Result<RunOutcome> {
        match &reason {
            ValidationError::UnsupportedFileType { name } => {
                warn!("Rejected submission: unsupported file {}", name)
            }
            ValidationError::MissingCredential => warn!("Rejected submission: no API key"),
        }
        self.renderer.warn(&reason.to_string())?;
        Ok(RunOutcome::Aborted(reason))
    }
}
