use interview_types::InterviewError;

use crate::{Context, Outcome, Question, Transformation, invoke_subquestion};

type Converter<From, To> = Box<dyn Fn(From) -> Result<To, InterviewError>>;

/// Wraps an inner question and converts its accepted answer.
///
/// Retrying belongs to the inner question's own validation: a failing
/// conversion is returned as an error and never re-asked. A skipped inner
/// question skips this one as well.
pub struct PostConvert<Q: Question, To> {
    inner: Q,
    convert: Converter<Q::Output, To>,
    transformations: Vec<Transformation<To>>,
}

impl<Q: Question, To> PostConvert<Q, To> {
    /// Wrap `inner` with a conversion that cannot fail.
    pub fn new<F>(inner: Q, convert: F) -> Self
    where
        F: Fn(Q::Output) -> To + 'static,
    {
        Self::try_new(inner, move |value| Ok(convert(value)))
    }

    /// Wrap `inner` with a conversion that may fail.
    pub fn try_new<F>(inner: Q, convert: F) -> Self
    where
        F: Fn(Q::Output) -> Result<To, InterviewError> + 'static,
    {
        Self {
            inner,
            convert: Box::new(convert),
            transformations: Vec::new(),
        }
    }
}

impl<Q: Question, To> Question for PostConvert<Q, To> {
    type Output = To;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<To>, InterviewError> {
        match invoke_subquestion(&mut self.inner, cx)? {
            Outcome::Answered(value) => (self.convert)(value).map(Outcome::Answered),
            Outcome::Skipped => Ok(Outcome::Skipped),
        }
    }

    fn transformations(&self) -> &[Transformation<To>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<To>> {
        &mut self.transformations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Int, Label, QuestionExt, ScriptedRenderer, evaluate};

    #[test]
    fn converts_accepted_answer() {
        let mut renderer = ScriptedRenderer::new().with_lines(["x", "21"]);
        let mut doubled = Int::new("n").map(|n| n * 2);

        let outcome = {
            let mut cx = Context::new(&mut renderer);
            evaluate(&mut doubled, &mut cx).unwrap()
        };
        assert_eq!(outcome, Outcome::Answered(42));
    }

    #[test]
    fn conversion_failure_is_not_retried() {
        let mut renderer = ScriptedRenderer::new().with_lines(["0", "5"]);
        let mut inverse = Int::new("n").try_map(|n| {
            if n == 0 {
                Err(InterviewError::conversion("cannot invert zero"))
            } else {
                Ok(1.0 / n as f64)
            }
        });

        let result = {
            let mut cx = Context::new(&mut renderer);
            evaluate(&mut inverse, &mut cx)
        };
        assert!(matches!(result, Err(InterviewError::Conversion(_))));
        assert_eq!(renderer.remaining(), 1);
    }

    #[test]
    fn skipped_inner_skips_wrapper() {
        let mut renderer = ScriptedRenderer::new();
        let mut wrapped = Label::<i64>::typed("just a label").map(|n| n + 1);

        let outcome = {
            let mut cx = Context::new(&mut renderer);
            evaluate(&mut wrapped, &mut cx).unwrap()
        };
        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(renderer.printed(), ["just a label"]);
    }
}
