use interview_types::InterviewError;

use crate::{Context, Outcome, Question, Transformation, invoke_subquestion};

type Factory<T> =
    Box<dyn FnMut(&Context<'_>) -> Result<Box<dyn Question<Output = T>>, InterviewError>>;

/// A question built at ask time from the answers collected so far.
///
/// The factory runs exactly once per ask and its question is dropped
/// afterwards, so asking twice builds two independent questions.
///
/// ```rust
/// # use interview::{Dynamic, Interview, ScriptedRenderer, YesNo};
/// # let mut renderer = ScriptedRenderer::new().with_lines(["n", ""]);
/// let answers = Interview::new()
///     .question("q1", YesNo::new("Choose next question's default").with_default(true))?
///     .question(
///         "q2",
///         Dynamic::new(|cx| {
///             let default = cx.answers()?.get_bool("q1")?;
///             Ok(YesNo::new("Start a subinterview?").with_default(default))
///         }),
///     )?
///     .run(&mut renderer)?;
///
/// // An empty line takes the default computed from "q1".
/// assert!(!answers.get_bool("q2")?);
/// # Ok::<(), interview::InterviewError>(())
/// ```
pub struct Dynamic<T> {
    make_question: Factory<T>,
    transformations: Vec<Transformation<T>>,
}

impl<T: 'static> Dynamic<T> {
    pub fn new<Q, F>(mut make_question: F) -> Self
    where
        F: FnMut(&Context<'_>) -> Result<Q, InterviewError> + 'static,
        Q: Question<Output = T> + 'static,
    {
        Self {
            make_question: Box::new(move |cx: &Context<'_>| {
                let question: Box<dyn Question<Output = T>> = Box::new(make_question(cx)?);
                Ok(question)
            }),
            transformations: Vec::new(),
        }
    }
}

impl<T> Question for Dynamic<T> {
    type Output = T;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<T>, InterviewError> {
        let mut question = (self.make_question)(&*cx)?;
        invoke_subquestion(question.as_mut(), cx)
    }

    fn transformations(&self) -> &[Transformation<T>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<T>> {
        &mut self.transformations
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{Int, ScriptedRenderer, evaluate};

    #[test]
    fn factory_runs_once_per_ask() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut question = Dynamic::new(move |_| {
            counter.set(counter.get() + 1);
            Ok(Int::new(format!("attempt {}", counter.get())))
        });

        let mut renderer = ScriptedRenderer::new().with_lines(["nope", "1", "2"]);
        {
            let mut cx = Context::new(&mut renderer);
            assert_eq!(evaluate(&mut question, &mut cx).unwrap(), Outcome::Answered(1));
            assert_eq!(evaluate(&mut question, &mut cx).unwrap(), Outcome::Answered(2));
        }

        // The rejected "nope" is retried by the built question, not by a new one.
        assert_eq!(calls.get(), 2);
        assert_eq!(renderer.prompts(), ["attempt 1", "attempt 1", "attempt 2"]);
    }

    #[test]
    fn factory_errors_propagate() {
        let mut question = Dynamic::new(|cx| {
            let default = cx.answers()?.get_int("missing")?;
            Ok(Int::new(format!("default {default}")))
        });

        let mut renderer = ScriptedRenderer::new();
        let mut cx = Context::new(&mut renderer);
        assert!(matches!(
            evaluate(&mut question, &mut cx),
            Err(InterviewError::NotInProgress)
        ));
    }
}
