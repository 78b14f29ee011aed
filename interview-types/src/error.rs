use std::fmt;

use crate::AnswerError;

/// Which input channel the user closed to abort an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortKind {
    /// A cancel request, such as Ctrl+C.
    SoftInterrupt,

    /// The input stream ended, such as Ctrl+D or a closed stdin.
    StreamEnd,
}

impl AbortKind {
    /// The conventional terminal echo for this signal.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::SoftInterrupt => "^C",
            Self::StreamEnd => "^D",
        }
    }
}

impl fmt::Display for AbortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SoftInterrupt => write!(f, "interrupted"),
            Self::StreamEnd => write!(f, "end of input"),
        }
    }
}

/// Error returned by a `Renderer` when it cannot produce a line.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The user aborted input.
    #[error("Input aborted: {0}")]
    Aborted(AbortKind),

    /// Backend-specific failure (I/O, terminal setup, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl ReadError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

/// Error type for interview operations.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    /// The user left the interview through one of the abort channels.
    #[error("Interview cancelled by user ({0})")]
    UserExit(AbortKind),

    /// Questions were registered under names that are already taken.
    #[error("Cannot add questions, keys already occupied: {}", keys.join(", "))]
    DuplicateKey { keys: Vec<String> },

    /// Answers were requested while no interview was collecting them.
    #[error("Answers are only available while an interview is in progress")]
    NotInProgress,

    /// An earlier sibling answer was looked up but never recorded.
    #[error("No answer recorded for '{0}' yet")]
    MissingAnswer(String),

    #[error("Answer error: {0}")]
    Answer(#[from] AnswerError),

    /// Post-processing of an accepted answer failed.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// The renderer failed for a reason other than a user abort.
    #[error("Renderer error: {0}")]
    Renderer(#[from] anyhow::Error),
}

impl InterviewError {
    /// Create a conversion error from any displayable cause.
    pub fn conversion(cause: impl fmt::Display) -> Self {
        Self::Conversion(cause.to_string())
    }

    /// Check if this error represents the user leaving the interview.
    pub fn is_user_exit(&self) -> bool {
        matches!(self, Self::UserExit(_))
    }

    /// The abort channel, if this is a user exit.
    pub fn abort_kind(&self) -> Option<AbortKind> {
        match self {
            Self::UserExit(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Process exit status an embedding CLI should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UserExit(_) => 2,
            _ => 1,
        }
    }
}

impl From<ReadError> for InterviewError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Aborted(kind) => Self::UserExit(kind),
            ReadError::Backend(err) => Self::Renderer(err),
        }
    }
}
