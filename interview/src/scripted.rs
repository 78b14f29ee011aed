//! Scripted renderer for running interviews without user interaction.
//!
//! `ScriptedRenderer` replays a fixed sequence of input lines and aborts,
//! and records every prompt and message it was shown. This is useful for
//! testing interviews end to end.
//!
//! # Example
//!
//! ```rust
//! use interview::{Int, Interview, ScriptedRenderer};
//!
//! let mut renderer = ScriptedRenderer::new().with_lines(["nope", "42"]);
//! let answers = Interview::new()
//!     .question("answer", Int::new("The answer?"))
//!     .unwrap()
//!     .run(&mut renderer)
//!     .unwrap();
//!
//! assert_eq!(answers.get_int("answer").unwrap(), 42);
//! assert_eq!(renderer.printed(), ["Provide a valid integer"]);
//! ```

use std::collections::VecDeque;

use interview_types::{AbortKind, ReadError, Renderer};

/// One scripted reaction to a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Line(String),
    Abort(AbortKind),
}

/// A renderer that answers prompts from a script.
///
/// Once the script runs out, every further read reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRenderer {
    script: VecDeque<ScriptStep>,
    prompts: Vec<String>,
    printed: Vec<String>,
}

impl ScriptedRenderer {
    /// Create a renderer with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one input line.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.script.push_back(ScriptStep::Line(line.into()));
        self
    }

    /// Queue several input lines.
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script
            .extend(lines.into_iter().map(|line| ScriptStep::Line(line.into())));
        self
    }

    /// Queue a Ctrl+C.
    pub fn with_interrupt(mut self) -> Self {
        self.script.push_back(ScriptStep::Abort(AbortKind::SoftInterrupt));
        self
    }

    /// Queue a Ctrl+D.
    pub fn with_end_of_input(mut self) -> Self {
        self.script.push_back(ScriptStep::Abort(AbortKind::StreamEnd));
        self
    }

    /// Prompts shown so far, indent included.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Messages printed so far, indent included.
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    /// Steps not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Renderer for ScriptedRenderer {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        self.prompts.push(prompt.to_string());

        match self.script.pop_front() {
            Some(ScriptStep::Line(line)) => Ok(line),
            Some(ScriptStep::Abort(kind)) => Err(ReadError::Aborted(kind)),
            None => Err(ReadError::Aborted(AbortKind::StreamEnd)),
        }
    }

    fn print(&mut self, message: &str) {
        self.printed.push(message.to_string());
    }
}
