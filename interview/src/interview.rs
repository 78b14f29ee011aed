use std::fmt;

use interview_types::{Answer, Answers, InterviewError, Renderer};
use tracing::{debug, instrument};

use crate::{AnyQuestion, Context, Outcome, PostConvert, Question, Transformation, evaluate};

/// An ordered set of named questions, itself a question yielding [`Answers`].
///
/// Children are asked in declaration order. Each child sees the answers of
/// the children declared before it through [`Context::answers`]; skipped
/// children are left out of the result.
///
/// ```rust
/// use interview::{Int, Interview, ScriptedRenderer, Str};
///
/// let mut renderer = ScriptedRenderer::new().with_lines(["Ada", "36"]);
/// let answers = Interview::new()
///     .question("name", Str::new("Name?").with_valid_if_not_empty_answer())?
///     .question("age", Int::new("Age?"))?
///     .run(&mut renderer)?;
///
/// assert_eq!(answers.get_string("name")?, "Ada");
/// assert_eq!(answers.get_int("age")?, 36);
/// # Ok::<(), interview::InterviewError>(())
/// ```
pub struct Interview {
    questions: Vec<(String, Box<dyn AnyQuestion>)>,
    transformations: Vec<Transformation<Answers>>,
    indent: String,
    renderer: Option<Box<dyn Renderer>>,
}

impl Interview {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            transformations: Vec::new(),
            indent: String::new(),
            renderer: None,
        }
    }

    /// Register a question under `name`.
    ///
    /// Fails with [`InterviewError::DuplicateKey`] if the name is taken.
    pub fn question(
        mut self,
        name: impl Into<String>,
        question: impl AnyQuestion + 'static,
    ) -> Result<Self, InterviewError> {
        let name: String = name.into();
        let question: Box<dyn AnyQuestion> = Box::new(question);
        self.add_questions([(name, question)])?;
        Ok(self)
    }

    /// Register a batch of questions, all or nothing.
    ///
    /// If any name is already taken, or appears twice in the batch, nothing
    /// is added and every offending name is reported.
    pub fn add_questions<I, N>(&mut self, batch: I) -> Result<&mut Self, InterviewError>
    where
        I: IntoIterator<Item = (N, Box<dyn AnyQuestion>)>,
        N: Into<String>,
    {
        let batch: Vec<(String, Box<dyn AnyQuestion>)> = batch
            .into_iter()
            .map(|(name, question)| (name.into(), question))
            .collect();

        let mut keys: Vec<String> = Vec::new();
        for (index, (name, _)) in batch.iter().enumerate() {
            let taken = self.contains(name) || batch[..index].iter().any(|(other, _)| other == name);
            if taken && !keys.contains(name) {
                keys.push(name.clone());
            }
        }
        if !keys.is_empty() {
            return Err(InterviewError::DuplicateKey { keys });
        }

        self.questions.extend(batch);
        Ok(self)
    }

    /// Prefix prompts and messages of this interview's children.
    ///
    /// Indents of nested interviews accumulate.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Use `renderer` for this interview's subtree instead of the
    /// surrounding one.
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.questions.iter().any(|(existing, _)| existing == name)
    }

    /// Question names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Answer with the value of one child instead of the whole mapping.
    ///
    /// If that child was skipped the result is a
    /// [`InterviewError::Conversion`] error.
    pub fn flatten_to(self, name: impl Into<String>) -> PostConvert<Interview, Answer> {
        let name = name.into();
        PostConvert::try_new(self, move |mut answers: Answers| {
            answers.remove(&name).ok_or_else(|| {
                InterviewError::conversion(format!("no answer named '{name}' to flatten to"))
            })
        })
    }

    /// Run this interview as the root of a question tree.
    ///
    /// A root whose own keep-if rules decline yields empty answers.
    pub fn run(&mut self, renderer: &mut dyn Renderer) -> Result<Answers, InterviewError> {
        let mut cx = Context::new(renderer);
        let outcome = evaluate(self, &mut cx)?;
        Ok(outcome.answered().unwrap_or_default())
    }

    #[instrument(
        level = "debug",
        name = "interview",
        skip_all,
        fields(depth = cx.depth(), questions = self.questions.len())
    )]
    fn collect(&mut self, cx: &mut Context<'_>) -> Result<Answers, InterviewError> {
        let mut answers = Answers::new();

        for (name, question) in &mut self.questions {
            let outcome = {
                let mut child = match self.renderer.as_mut() {
                    Some(renderer) => cx.scope_with(renderer.as_mut(), &self.indent, &answers),
                    None => cx.scope(&self.indent, &answers),
                };
                question.evaluate_any(&mut child)?
            };

            match outcome {
                Outcome::Answered(answer) => answers.insert(name.clone(), answer),
                Outcome::Skipped => debug!(%name, "question skipped"),
            }
        }

        Ok(answers)
    }
}

impl Default for Interview {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interview")
            .field("questions", &self.names().collect::<Vec<_>>())
            .field("indent", &self.indent)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

impl Question for Interview {
    type Output = Answers;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<Answers>, InterviewError> {
        self.collect(cx).map(Outcome::Answered)
    }

    fn transformations(&self) -> &[Transformation<Answers>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<Answers>> {
        &mut self.transformations
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{Dynamic, Int, Label, QuestionExt, ScriptedRenderer, Str, YesNo};

    #[test]
    fn answers_follow_declaration_order() {
        let mut renderer = ScriptedRenderer::new().with_lines(["z", "1", "y"]);
        let answers = Interview::new()
            .question("zeta", Str::new("zeta"))
            .unwrap()
            .question("alpha", Int::new("alpha"))
            .unwrap()
            .question("mid", YesNo::new("mid"))
            .unwrap()
            .run(&mut renderer)
            .unwrap();

        assert_eq!(answers.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(renderer.prompts(), ["zeta", "alpha", "mid (y/n)"]);
    }

    #[test]
    fn duplicate_names_are_rejected_atomically() {
        let mut interview = Interview::new().question("a", Int::new("a")).unwrap();

        let err = interview
            .add_questions([
                ("b", Int::new("b").erased()),
                ("a", Int::new("a again").erased()),
            ])
            .unwrap_err();
        assert!(matches!(err, InterviewError::DuplicateKey { keys } if keys == ["a"]));
        assert_eq!(interview.names().collect::<Vec<_>>(), ["a"]);

        let err = interview
            .add_questions([("c", Int::new("c").erased()), ("c", Int::new("c").erased())])
            .unwrap_err();
        assert!(matches!(err, InterviewError::DuplicateKey { keys } if keys == ["c"]));
        assert_eq!(interview.len(), 1);

        interview
            .add_questions([("b", Int::new("b").erased()), ("c", Int::new("c").erased())])
            .unwrap();
        assert_eq!(interview.names().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn skipped_questions_are_never_asked() {
        // Asking would hit the interrupt.
        let mut renderer = ScriptedRenderer::new().with_interrupt();
        let answers = Interview::new()
            .question("hidden", Int::new("hidden").skip())
            .unwrap()
            .run(&mut renderer)
            .unwrap();

        assert!(answers.is_empty());
        assert!(renderer.prompts().is_empty());
        assert_eq!(renderer.remaining(), 1);
    }

    #[test]
    fn labels_print_but_are_not_recorded() {
        let mut renderer = ScriptedRenderer::new().with_line("x");
        let answers = Interview::new()
            .question("intro", Label::new("Welcome"))
            .unwrap()
            .question("value", Str::new("value"))
            .unwrap()
            .run(&mut renderer)
            .unwrap();

        assert_eq!(answers.keys().collect::<Vec<_>>(), ["value"]);
        assert_eq!(renderer.printed(), ["Welcome"]);
    }

    #[test]
    fn keep_if_previous_answer() {
        let mut renderer = ScriptedRenderer::new().with_lines(["n", "y", "deep"]);
        let answers = Interview::new()
            .question("first", YesNo::new("first"))
            .unwrap()
            .question(
                "only_if_first",
                Str::new("never").with_keep_if_previous_answer_truthy("first"),
            )
            .unwrap()
            .question("second", YesNo::new("second"))
            .unwrap()
            .question(
                "only_if_second",
                Str::new("asked").with_keep_if_previous_answer("second", |a| a.as_bool() == Some(true)),
            )
            .unwrap()
            .run(&mut renderer)
            .unwrap();

        assert!(!answers.contains("only_if_first"));
        assert_eq!(answers.get_string("only_if_second").unwrap(), "deep");
    }

    #[test]
    fn referencing_a_later_sibling_fails() {
        let mut renderer = ScriptedRenderer::new().with_line("1");
        let err = Interview::new()
            .question("early", Int::new("early").with_keep_if_previous_answer_truthy("late"))
            .unwrap()
            .question("late", Int::new("late"))
            .unwrap()
            .run(&mut renderer)
            .unwrap_err();

        assert!(matches!(err, InterviewError::MissingAnswer(name) if name == "late"));
    }

    #[test]
    fn nested_interviews_accumulate_indent() {
        let mut renderer = ScriptedRenderer::new().with_lines(["top", "inner"]);
        let answers = Interview::new()
            .question("top", Str::new("top"))
            .unwrap()
            .question(
                "sub",
                Interview::new()
                    .with_indent("  ")
                    .question("note", Label::new("details"))
                    .unwrap()
                    .question("inner", Str::new("inner"))
                    .unwrap(),
            )
            .unwrap()
            .with_indent("> ")
            .run(&mut renderer)
            .unwrap();

        assert_eq!(renderer.prompts(), ["> top", ">   inner"]);
        assert_eq!(renderer.printed(), [">   details"]);
        let sub = answers.get_map("sub").unwrap();
        assert_eq!(sub.get_string("inner").unwrap(), "inner");
    }

    #[test]
    fn nested_renderer_takes_over() {
        let mut renderer = ScriptedRenderer::new().with_line("outer");
        let answers = Interview::new()
            .question("a", Str::new("a"))
            .unwrap()
            .question(
                "sub",
                Interview::new()
                    .with_renderer(ScriptedRenderer::new().with_line("from nested"))
                    .question("b", Str::new("b"))
                    .unwrap(),
            )
            .unwrap()
            .run(&mut renderer)
            .unwrap();

        assert_eq!(renderer.prompts(), ["a"]);
        assert_eq!(
            answers.get_map("sub").unwrap().get_string("b").unwrap(),
            "from nested"
        );
    }

    #[test]
    fn dynamic_sees_only_earlier_siblings() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        let mut interview = Interview::new()
            .question("before", Int::new("before"))
            .unwrap()
            .question(
                "dynamic",
                Dynamic::new(move |cx| {
                    let keys: Vec<String> = cx.answers()?.keys().map(str::to_string).collect();
                    log.borrow_mut().push(keys);
                    Ok(Int::new("dynamic"))
                }),
            )
            .unwrap()
            .question("after", Int::new("after"))
            .unwrap();

        let mut renderer = ScriptedRenderer::new().with_lines(["1", "2", "3", "4", "5", "6"]);
        interview.run(&mut renderer).unwrap();
        interview.run(&mut renderer).unwrap();

        assert_eq!(*seen.borrow(), [vec!["before".to_string()], vec!["before".to_string()]]);
    }

    #[test]
    fn runs_are_independent() {
        let mut interview = Interview::new()
            .question("gate", YesNo::new("gate"))
            .unwrap()
            .question("value", Int::new("value").with_keep_if_previous_answer_truthy("gate"))
            .unwrap();

        let mut renderer = ScriptedRenderer::new().with_lines(["y", "7", "n"]);
        let first = interview.run(&mut renderer).unwrap();
        let second = interview.run(&mut renderer).unwrap();

        assert_eq!(first.get_int("value").unwrap(), 7);
        assert!(!second.contains("value"));
    }

    #[test]
    fn flatten_to_picks_one_answer() {
        let inner = || {
            Interview::new()
                .question("x", Int::new("x"))
                .unwrap()
                .question("y", Int::new("y"))
                .unwrap()
        };

        let mut renderer = ScriptedRenderer::new().with_lines(["1", "2", "1", "2"]);
        let nested = Interview::new()
            .question("sub", inner())
            .unwrap()
            .run(&mut renderer)
            .unwrap();
        let flat = Interview::new()
            .question("sub", inner().flatten_to("x"))
            .unwrap()
            .run(&mut renderer)
            .unwrap();

        let direct = nested.get_map("sub").unwrap().get("x").unwrap();
        assert_eq!(flat.get("sub").unwrap(), direct);
    }

    #[test]
    fn flatten_to_skipped_key_is_conversion_error() {
        let mut renderer = ScriptedRenderer::new();
        let err = Interview::new()
            .question(
                "sub",
                Interview::new()
                    .question("x", Int::new("x").skip())
                    .unwrap()
                    .flatten_to("x"),
            )
            .unwrap()
            .run(&mut renderer)
            .unwrap_err();

        assert!(matches!(err, InterviewError::Conversion(_)));
    }

    #[test]
    fn skipped_root_yields_empty_answers() {
        let mut renderer = ScriptedRenderer::new().with_line("1");
        let answers = Interview::new()
            .question("x", Int::new("x"))
            .unwrap()
            .skip()
            .run(&mut renderer)
            .unwrap();

        assert!(answers.is_empty());
        assert_eq!(renderer.remaining(), 1);
    }
}
