//! Rules attached to questions: keep-if and valid-if.

use std::fmt;

use interview_types::InterviewError;

use crate::Context;

/// Default message shown when a valid-if rejects an answer.
pub const DEFAULT_INVALID_MESSAGE: &str = "Invalid value, try again";

type KeepPredicate = Box<dyn Fn(&Context<'_>) -> Result<bool, InterviewError>>;
type ValidPredicate<T> = Box<dyn Fn(&Context<'_>, &T) -> bool>;

/// A rule attached to a question producing values of type `T`.
pub enum Transformation<T> {
    /// Decides whether the question is asked at all.
    KeepIf(KeepIf),

    /// Decides whether a produced answer is accepted.
    ValidIf(ValidIf<T>),
}

impl<T> Transformation<T> {
    /// Whether the question should be asked in the given context.
    ///
    /// Valid-if rules always keep.
    pub fn keeps(&self, cx: &Context<'_>) -> Result<bool, InterviewError> {
        match self {
            Self::KeepIf(keep_if) => (keep_if.predicate)(cx),
            Self::ValidIf(_) => Ok(true),
        }
    }

    /// Whether `answer` is accepted. Keep-if rules accept everything.
    pub fn validate(&self, cx: &Context<'_>, answer: &T) -> bool {
        match self {
            Self::KeepIf(_) => true,
            Self::ValidIf(valid_if) => (valid_if.predicate)(cx, answer),
        }
    }

    /// The message to show after [`validate`](Self::validate) rejected `answer`.
    pub fn invalid_message(&self, answer: &T) -> Option<String> {
        match self {
            Self::KeepIf(_) => None,
            Self::ValidIf(valid_if) => valid_if.message.render(answer),
        }
    }
}

impl<T> fmt::Debug for Transformation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepIf(_) => f.write_str("KeepIf"),
            Self::ValidIf(valid_if) => f.debug_tuple("ValidIf").field(&valid_if.message).finish(),
        }
    }
}

impl<T> From<KeepIf> for Transformation<T> {
    fn from(keep_if: KeepIf) -> Self {
        Self::KeepIf(keep_if)
    }
}

impl<T> From<ValidIf<T>> for Transformation<T> {
    fn from(valid_if: ValidIf<T>) -> Self {
        Self::ValidIf(valid_if)
    }
}

/// Skips the question when the predicate returns `false`.
pub struct KeepIf {
    predicate: KeepPredicate,
}

impl KeepIf {
    /// The predicate sees the context only: sibling answers, indent and depth.
    /// It is not handed the question it guards, and rules never replace it.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<bool, InterviewError> + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

/// Rejects answers for which the predicate returns `false`.
pub struct ValidIf<T> {
    predicate: ValidPredicate<T>,
    message: Rejection<T>,
}

impl<T> ValidIf<T> {
    /// Create a rule with the default rejection message.
    ///
    /// Like [`KeepIf::new`], the predicate gets the context and the answer
    /// but not the question.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context<'_>, &T) -> bool + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            message: Rejection::Fixed(DEFAULT_INVALID_MESSAGE.to_string()),
        }
    }

    /// Use a fixed rejection message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Rejection::Fixed(message.into());
        self
    }

    /// Build the rejection message from the rejected answer.
    pub fn with_message_fn<F>(mut self, message: F) -> Self
    where
        F: Fn(&T) -> String + 'static,
    {
        self.message = Rejection::Computed(Box::new(message));
        self
    }

    /// Re-prompt without printing anything.
    pub fn silent(mut self) -> Self {
        self.message = Rejection::Silent;
        self
    }
}

enum Rejection<T> {
    Silent,
    Fixed(String),
    Computed(Box<dyn Fn(&T) -> String>),
}

impl<T> Rejection<T> {
    fn render(&self, answer: &T) -> Option<String> {
        match self {
            Self::Silent => None,
            Self::Fixed(message) => Some(message.clone()),
            Self::Computed(message) => Some(message(answer)),
        }
    }
}

impl<T> fmt::Debug for Rejection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => f.write_str("Silent"),
            Self::Fixed(message) => f.debug_tuple("Fixed").field(message).finish(),
            Self::Computed(_) => f.write_str("Computed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedRenderer;

    #[test]
    fn keep_if_follows_predicate() {
        let mut renderer = ScriptedRenderer::new();
        let cx = Context::new(&mut renderer);

        let keep: Transformation<i64> = KeepIf::new(|_| Ok(false)).into();
        assert!(!keep.keeps(&cx).unwrap());
        assert!(keep.validate(&cx, &1));
        assert_eq!(keep.invalid_message(&1), None);
    }

    #[test]
    fn valid_if_messages() {
        let mut renderer = ScriptedRenderer::new();
        let cx = Context::new(&mut renderer);

        let fixed: Transformation<i64> = ValidIf::new(|_, a: &i64| *a > 0).into();
        assert!(fixed.keeps(&cx).unwrap());
        assert!(!fixed.validate(&cx, &-1));
        assert_eq!(
            fixed.invalid_message(&-1).as_deref(),
            Some(DEFAULT_INVALID_MESSAGE)
        );

        let computed: Transformation<i64> = ValidIf::new(|_, a: &i64| *a > 0)
            .with_message_fn(|a| format!("{a} is not positive"))
            .into();
        assert_eq!(
            computed.invalid_message(&-3).as_deref(),
            Some("-3 is not positive")
        );

        let silent: Transformation<i64> = ValidIf::new(|_, _: &i64| false).silent().into();
        assert_eq!(silent.invalid_message(&0), None);
    }
}
