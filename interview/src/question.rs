//! The question abstraction and the ask-with-validation protocol.

use interview_types::{Answer, InterviewError};
use tracing::debug;

use crate::{Context, KeepIf, PostConvert, Transformation, ValidIf};

/// Result of evaluating a question that was not aborted.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The question produced an accepted value.
    Answered(T),

    /// The question is left out of the enclosing answers.
    Skipped,
}

impl<T> Outcome<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// The answer, if there is one.
    pub fn answered(self) -> Option<T> {
        match self {
            Self::Answered(value) => Some(value),
            Self::Skipped => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Answered(value) => Outcome::Answered(f(value)),
            Self::Skipped => Outcome::Skipped,
        }
    }
}

/// A unit of interaction producing a value of type `Output`.
///
/// Implementors only provide the raw [`ask`](Question::ask) and storage for
/// their transformations. Composites must run their sub-questions through
/// [`invoke_subquestion`], never through `ask` directly, so that keep-if and
/// valid-if rules apply at every level.
pub trait Question {
    type Output;

    /// Produce one candidate answer, without applying transformations.
    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<Self::Output>, InterviewError>;

    /// Attached transformations, in attachment order.
    fn transformations(&self) -> &[Transformation<Self::Output>];

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<Self::Output>>;
}

/// Evaluate a question: keep-if rules first, then ask with validation.
///
/// Returns `Skipped` without asking if any keep-if rule declines.
pub fn evaluate<Q>(
    question: &mut Q,
    cx: &mut Context<'_>,
) -> Result<Outcome<Q::Output>, InterviewError>
where
    Q: Question + ?Sized,
{
    for transformation in question.transformations() {
        if !transformation.keeps(cx)? {
            debug!(depth = cx.depth(), "keep-if declined");
            return Ok(Outcome::Skipped);
        }
    }

    ask_with_validation(question, cx)
}

/// Ask until every valid-if rule accepts the answer.
///
/// Rules run in attachment order and stop at the first rejection, whose
/// message is printed before asking again. There is no retry limit: the only
/// way out without an accepted answer is a user abort, which propagates.
pub fn ask_with_validation<Q>(
    question: &mut Q,
    cx: &mut Context<'_>,
) -> Result<Outcome<Q::Output>, InterviewError>
where
    Q: Question + ?Sized,
{
    let mut attempt = 1_usize;

    loop {
        let answer = match question.ask(cx)? {
            Outcome::Answered(answer) => answer,
            Outcome::Skipped => return Ok(Outcome::Skipped),
        };

        let rejected_by = {
            let view: &Context<'_> = &*cx;
            question
                .transformations()
                .iter()
                .find(|transformation| !transformation.validate(view, &answer))
        };

        let Some(rule) = rejected_by else {
            return Ok(Outcome::Answered(answer));
        };

        debug!(attempt, depth = cx.depth(), "answer rejected");
        if let Some(message) = rule.invalid_message(&answer) {
            cx.print(&message);
        }
        attempt += 1;
    }
}

/// Run a sub-question on behalf of a composite question.
///
/// A `Skipped` result is handed back unchanged; each composite decides
/// whether that skips the composite too.
pub fn invoke_subquestion<Q>(
    question: &mut Q,
    cx: &mut Context<'_>,
) -> Result<Outcome<Q::Output>, InterviewError>
where
    Q: Question + ?Sized,
{
    let outcome = evaluate(question, cx)?;
    if outcome.is_skipped() {
        debug!(depth = cx.depth(), "sub-question skipped");
    }
    Ok(outcome)
}

/// Chaining helpers available on every sized question.
pub trait QuestionExt: Question + Sized {
    /// Append a transformation.
    fn with_transformation(mut self, transformation: impl Into<Transformation<Self::Output>>) -> Self {
        self.transformations_mut().push(transformation.into());
        self
    }

    /// Only ask this question when `predicate` holds.
    fn with_keep_if<F>(self, predicate: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<bool, InterviewError> + 'static,
    {
        self.with_transformation(KeepIf::new(predicate))
    }

    /// Only ask this question when an earlier sibling's answer satisfies
    /// `predicate`.
    ///
    /// Fails with [`InterviewError::MissingAnswer`] if `name` has no answer
    /// yet, so only questions declared earlier can be referenced.
    fn with_keep_if_previous_answer<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Answer) -> bool + 'static,
    {
        let name = name.into();
        self.with_keep_if(move |cx| Ok(predicate(cx.answer(&name)?)))
    }

    /// Only ask this question when an earlier sibling's answer is truthy.
    fn with_keep_if_previous_answer_truthy(self, name: impl Into<String>) -> Self {
        self.with_keep_if_previous_answer(name, Answer::is_truthy)
    }

    /// Never ask this question.
    fn skip(self) -> Self {
        self.with_keep_if(|_| Ok(false))
    }

    /// Reject answers failing `predicate`, printing `message`.
    fn with_valid_if<F>(self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Context<'_>, &Self::Output) -> bool + 'static,
    {
        self.with_transformation(ValidIf::new(predicate).with_message(message))
    }

    /// Reject answers failing `predicate` without printing anything.
    fn with_silent_valid_if<F>(self, predicate: F) -> Self
    where
        F: Fn(&Context<'_>, &Self::Output) -> bool + 'static,
    {
        self.with_transformation(ValidIf::new(predicate).silent())
    }

    /// Convert the accepted answer with an infallible function.
    fn map<To, F>(self, convert: F) -> PostConvert<Self, To>
    where
        F: Fn(Self::Output) -> To + 'static,
    {
        PostConvert::new(self, convert)
    }

    /// Convert the accepted answer with a function that may fail.
    ///
    /// Failures are not retried; they propagate as errors.
    fn try_map<To, F>(self, convert: F) -> PostConvert<Self, To>
    where
        F: Fn(Self::Output) -> Result<To, InterviewError> + 'static,
    {
        PostConvert::try_new(self, convert)
    }

    /// Erase the output type so the question can join an interview batch.
    fn erased(self) -> Box<dyn AnyQuestion>
    where
        Self: 'static,
        Self::Output: Into<Answer>,
    {
        Box::new(self)
    }
}

impl<Q: Question> QuestionExt for Q {}

/// A question whose answer is stored as a dynamically typed [`Answer`].
///
/// Implemented for every question whose output converts into `Answer`;
/// this is what an [`Interview`](crate::Interview) holds.
pub trait AnyQuestion {
    fn evaluate_any(&mut self, cx: &mut Context<'_>) -> Result<Outcome<Answer>, InterviewError>;
}

impl<Q> AnyQuestion for Q
where
    Q: Question,
    Q::Output: Into<Answer>,
{
    fn evaluate_any(&mut self, cx: &mut Context<'_>) -> Result<Outcome<Answer>, InterviewError> {
        Ok(evaluate(self, cx)?.map(Into::into))
    }
}
