//! Typed line questions: text, integers, floats, yes/no and labels.
//!
//! Every leaf reads through [`Context::read_line`]; numbers and yes/no are
//! thin wrappers over a [`Str`] sub-question that validates the raw text.

use std::marker::PhantomData;
use std::str::FromStr;

use interview_types::{Answer, InterviewError};

use crate::{Context, Outcome, Question, QuestionExt, Transformation, invoke_subquestion};

/// Default message for text that is not an integer.
pub const INVALID_INT_MESSAGE: &str = "Provide a valid integer";

/// Default message for text that is not a float.
pub const INVALID_FLOAT_MESSAGE: &str = "Provide a valid float";

/// Message for an empty answer where one is required.
pub const EMPTY_ANSWER_MESSAGE: &str = "Provide a non-empty answer";

/// A single line of text, with surrounding whitespace removed.
pub struct Str {
    text: String,
    default: Option<String>,
    choices: Vec<String>,
    show_default: bool,
    show_choices: bool,
    transformations: Vec<Transformation<String>>,
}

impl Str {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default: None,
            choices: Vec::new(),
            show_default: true,
            show_choices: true,
            transformations: Vec::new(),
        }
    }

    /// Answer used when the user submits an empty line.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Choices listed after the prompt. They are shown, not enforced.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn show_default(mut self, show: bool) -> Self {
        self.show_default = show;
        self
    }

    pub fn show_choices(mut self, show: bool) -> Self {
        self.show_choices = show;
        self
    }

    pub fn with_valid_if_not_empty_answer(self) -> Self {
        self.with_valid_if(|_, answer: &String| !answer.is_empty(), EMPTY_ANSWER_MESSAGE)
    }

    /// The prompt as presented, e.g. `Color (red, blue) [red]`.
    pub fn prompt(&self) -> String {
        let mut prompt = self.text.clone();
        if self.show_choices && !self.choices.is_empty() {
            prompt.push_str(&format!(" ({})", self.choices.join(", ")));
        }
        if self.show_default
            && let Some(default) = &self.default
        {
            prompt.push_str(&format!(" [{default}]"));
        }
        prompt
    }
}

impl Question for Str {
    type Output = String;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<String>, InterviewError> {
        let raw = cx.read_line(&self.prompt())?;
        let line = raw.trim();

        match &self.default {
            Some(default) if line.is_empty() => Ok(Outcome::Answered(default.clone())),
            _ => Ok(Outcome::Answered(line.to_string())),
        }
    }

    fn transformations(&self) -> &[Transformation<String>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<String>> {
        &mut self.transformations
    }
}

/// Ask a `Str` that only accepts text parsing as `N`, then parse it.
fn ask_parsed<N>(
    text: &str,
    invalid_message: &str,
    cx: &mut Context<'_>,
) -> Result<Outcome<N>, InterviewError>
where
    N: FromStr + 'static,
    N::Err: std::fmt::Display,
{
    let mut raw = Str::new(text).with_valid_if(
        |_, answer: &String| answer.trim().parse::<N>().is_ok(),
        invalid_message,
    );

    match invoke_subquestion(&mut raw, cx)? {
        Outcome::Answered(answer) => answer
            .trim()
            .parse::<N>()
            .map(Outcome::Answered)
            .map_err(InterviewError::conversion),
        Outcome::Skipped => Ok(Outcome::Skipped),
    }
}

/// An integer, re-asked until the text parses.
pub struct Int {
    text: String,
    invalid_message: String,
    transformations: Vec<Transformation<i64>>,
}

impl Int {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            invalid_message: INVALID_INT_MESSAGE.to_string(),
            transformations: Vec::new(),
        }
    }

    /// Message printed when the text is not an integer.
    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = message.into();
        self
    }
}

impl Question for Int {
    type Output = i64;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<i64>, InterviewError> {
        ask_parsed(&self.text, &self.invalid_message, cx)
    }

    fn transformations(&self) -> &[Transformation<i64>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<i64>> {
        &mut self.transformations
    }
}

/// A floating-point number, re-asked until the text parses.
pub struct Float {
    text: String,
    invalid_message: String,
    transformations: Vec<Transformation<f64>>,
}

impl Float {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            invalid_message: INVALID_FLOAT_MESSAGE.to_string(),
            transformations: Vec::new(),
        }
    }

    /// Message printed when the text is not a number.
    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = message.into();
        self
    }
}

impl Question for Float {
    type Output = f64;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<f64>, InterviewError> {
        ask_parsed(&self.text, &self.invalid_message, cx)
    }

    fn transformations(&self) -> &[Transformation<f64>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<f64>> {
        &mut self.transformations
    }
}

/// Sign checks for numeric questions.
pub trait NumericQuestion: QuestionExt
where
    Self::Output: PartialOrd + Default,
{
    fn with_valid_if_positive(self) -> Self {
        self.with_valid_if(|_, a| *a > Self::Output::default(), "Value must be positive")
    }

    fn with_valid_if_negative(self) -> Self {
        self.with_valid_if(|_, a| *a < Self::Output::default(), "Value must be negative")
    }

    fn with_valid_if_non_positive(self) -> Self {
        self.with_valid_if(|_, a| *a <= Self::Output::default(), "Value must be non-positive")
    }

    fn with_valid_if_non_negative(self) -> Self {
        self.with_valid_if(|_, a| *a >= Self::Output::default(), "Value must be non-negative")
    }

    fn with_valid_if_not_zero(self) -> Self {
        self.with_valid_if(|_, a| *a != Self::Output::default(), "Value must not be zero")
    }
}

impl NumericQuestion for Int {}
impl NumericQuestion for Float {}

/// A yes/no question. Only `y` and `yes` (any case) count as yes.
pub struct YesNo {
    text: String,
    default: Option<bool>,
    show_choices: bool,
    transformations: Vec<Transformation<bool>>,
}

impl YesNo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default: None,
            show_choices: true,
            transformations: Vec::new(),
        }
    }

    /// Answer used for an empty line. Without one, empty lines are rejected.
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }

    pub fn show_choices(mut self, show: bool) -> Self {
        self.show_choices = show;
        self
    }

    /// The prompt as presented, e.g. `Continue? [Y/n]`.
    pub fn prompt(&self) -> String {
        if !self.show_choices {
            return self.text.clone();
        }
        let hint = match self.default {
            None => "(y/n)",
            Some(true) => "[Y/n]",
            Some(false) => "[y/N]",
        };
        format!("{} {hint}", self.text)
    }
}

impl Question for YesNo {
    type Output = bool;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<bool>, InterviewError> {
        let mut raw = Str::new(self.prompt());
        if self.default.is_none() {
            raw = raw.with_valid_if_not_empty_answer();
        }

        let answer = match invoke_subquestion(&mut raw, cx)? {
            Outcome::Answered(answer) => answer,
            Outcome::Skipped => return Ok(Outcome::Skipped),
        };

        let yes = match self.default {
            Some(default) if answer.is_empty() => default,
            _ => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        };
        Ok(Outcome::Answered(yes))
    }

    fn transformations(&self) -> &[Transformation<bool>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<bool>> {
        &mut self.transformations
    }
}

/// Prints its text and is never recorded.
///
/// The output type only matters for where a label can be placed; it is
/// [`Answer`] for interview entries, and any `T` through [`Label::typed`].
pub struct Label<T = Answer> {
    text: String,
    transformations: Vec<Transformation<T>>,
    _output: PhantomData<fn() -> T>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self::typed(text)
    }
}

impl<T> Label<T> {
    /// A label standing in for a question of output type `T`.
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            transformations: Vec::new(),
            _output: PhantomData,
        }
    }
}

impl<T> Question for Label<T> {
    type Output = T;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<T>, InterviewError> {
        cx.print(&self.text);
        Ok(Outcome::Skipped)
    }

    fn transformations(&self) -> &[Transformation<T>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<T>> {
        &mut self.transformations
    }
}
