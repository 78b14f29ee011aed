//! Core types for the interview crate.
//!
//! This crate provides the presentation-agnostic building blocks:
//! - `Answer` and `Answers` - Collected values and the ordered name mapping
//! - `InterviewError`, `AbortKind` and `ReadError` - The error taxonomy
//! - `Renderer` - The boundary to whatever draws prompts and reads lines

mod answer;
pub use answer::Answer;

mod answers;
pub use answers::{AnswerError, Answers};

mod error;
pub use error::{AbortKind, InterviewError, ReadError};

mod renderer;
pub use renderer::Renderer;
