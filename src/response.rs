//! Turns a gateway outcome into the reply text shown to the user.

use crate::ai::ChatOutcome;
use crate::postprocess::ReplyPostProcessor;

/// Successful replies go through `post`; non-200 responses become a
/// diagnostic reply instead of an error and are never post-processed.
pub fn interpret_outcome(outcome: ChatOutcome, post: &dyn ReplyPostProcessor) -> String {
    match outcome {
        ChatOutcome::Reply(text) => post.process(text),
        ChatOutcome::HttpError { status, body } => format!("Error: {}\n{}", status, body),
    }
}
