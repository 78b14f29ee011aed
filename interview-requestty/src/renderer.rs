//! Requestty implementation of the `Renderer` trait.

use interview::{AbortKind, ReadError, Renderer};
use thiserror::Error;
use tracing::trace;

/// Failures of the requestty renderer that are not user aborts.
#[derive(Debug, Error)]
pub enum RequesttyError {
    /// An error occurred during prompting.
    #[error("Prompt error: {0}")]
    Prompt(#[from] requestty::ErrorKind),

    /// Unexpected answer type received.
    #[error("Unexpected answer type: expected {expected}, got {got}")]
    UnexpectedAnswerType { expected: String, got: String },
}

/// Map a requestty failure onto the renderer boundary.
///
/// Ctrl+C is a soft interrupt and Ctrl+D is the end of input; anything else
/// is a backend failure.
fn read_error(err: requestty::ErrorKind) -> ReadError {
    match err {
        requestty::ErrorKind::Interrupted => ReadError::Aborted(AbortKind::SoftInterrupt),
        requestty::ErrorKind::Eof => ReadError::Aborted(AbortKind::StreamEnd),
        other => ReadError::backend(RequesttyError::from(other)),
    }
}

/// Line renderer for interactive CLI prompts.
///
/// Every read is a single requestty input question. Validation and
/// re-prompting stay with the interview, so no requestty validator is set.
#[derive(Debug, Default, Clone)]
pub struct RequesttyRenderer;

impl RequesttyRenderer {
    /// Create a new requestty renderer.
    pub const fn new() -> Self {
        Self
    }
}

impl Renderer for RequesttyRenderer {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        let question = requestty::Question::input("answer").message(prompt).build();

        match requestty::prompt_one(question) {
            Ok(requestty::Answer::String(line)) => Ok(line),
            Ok(other) => Err(ReadError::backend(RequesttyError::UnexpectedAnswerType {
                expected: "String".to_string(),
                got: format!("{other:?}"),
            })),
            Err(err) => {
                trace!(error = %err, "requestty prompt failed");
                Err(read_error(err))
            }
        }
    }

    fn print(&mut self, message: &str) {
        println!("{message}");
    }
}
