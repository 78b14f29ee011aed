//! The evaluation context threaded through every `ask`.

use std::cell::Cell;
use std::rc::Rc;

use interview_types::{Answer, Answers, InterviewError, Renderer};
use tracing::{debug, trace};

/// Scoped state for one level of an interview tree.
///
/// A context carries the effective renderer, the accumulated indent and,
/// while an [`Interview`](crate::Interview) is collecting, the answers of
/// its earlier questions. Interviews derive a fresh context for their
/// children; a child never changes what its parent sees.
pub struct Context<'a> {
    renderer: &'a mut dyn Renderer,
    indent: String,
    answers: Option<&'a Answers>,
    depth: usize,
    reads: Rc<Cell<usize>>,
}

impl<'a> Context<'a> {
    /// Create a root context. No answers are in scope at the root.
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self {
            renderer,
            indent: String::new(),
            answers: None,
            depth: 0,
            reads: Rc::new(Cell::new(0)),
        }
    }

    /// Answers recorded so far by the interview currently collecting.
    ///
    /// Only earlier siblings are visible. Fails with
    /// [`InterviewError::NotInProgress`] outside of an interview.
    pub fn answers(&self) -> Result<&Answers, InterviewError> {
        self.answers.ok_or(InterviewError::NotInProgress)
    }

    /// Look up the answer of an earlier sibling by name.
    pub fn answer(&self, name: &str) -> Result<&Answer, InterviewError> {
        self.answers()?
            .get(name)
            .ok_or_else(|| InterviewError::MissingAnswer(name.to_string()))
    }

    /// The indent prefixed to every prompt and message in this scope.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// How many interviews enclose this scope.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Lines requested from the renderer so far, across the whole tree.
    ///
    /// Aborted reads count too.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Show `prompt` and read one raw line.
    ///
    /// Renderer aborts surface as [`InterviewError::UserExit`].
    pub fn read_line(&mut self, prompt: &str) -> Result<String, InterviewError> {
        let prompt = format!("{}{}", self.indent, prompt);
        trace!(%prompt, depth = self.depth, "reading line");
        self.reads.set(self.reads.get() + 1);

        self.renderer.read_line(&prompt).map_err(|err| {
            let err = InterviewError::from(err);
            if let Some(kind) = err.abort_kind() {
                debug!(%kind, depth = self.depth, "user abort");
            }
            err
        })
    }

    /// Print an out-of-band message.
    pub fn print(&mut self, message: &str) {
        let message = format!("{}{}", self.indent, message);
        self.renderer.print(&message);
    }

    /// Derive the context for the children of a nested interview.
    pub(crate) fn scope<'b>(&'b mut self, indent: &str, answers: &'b Answers) -> Context<'b> {
        Context {
            renderer: &mut *self.renderer,
            indent: format!("{}{}", self.indent, indent),
            answers: Some(answers),
            depth: self.depth + 1,
            reads: Rc::clone(&self.reads),
        }
    }

    /// Like [`scope`](Self::scope), but with a renderer configured on the
    /// nested interview taking over.
    pub(crate) fn scope_with<'b>(
        &self,
        renderer: &'b mut dyn Renderer,
        indent: &str,
        answers: &'b Answers,
    ) -> Context<'b> {
        Context {
            renderer,
            indent: format!("{}{}", self.indent, indent),
            answers: Some(answers),
            depth: self.depth + 1,
            reads: Rc::clone(&self.reads),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedRenderer;
    use interview_types::AbortKind;

    #[test]
    fn root_has_no_answers() {
        let mut renderer = ScriptedRenderer::new();
        let cx = Context::new(&mut renderer);

        assert!(matches!(cx.answers(), Err(InterviewError::NotInProgress)));
        assert!(matches!(cx.answer("x"), Err(InterviewError::NotInProgress)));
    }

    #[test]
    fn scoped_indent_accumulates() {
        let mut renderer = ScriptedRenderer::new().with_line("hi");
        let answers = Answers::new();
        {
            let mut root = Context::new(&mut renderer);
            let mut outer = root.scope("| ", &answers);
            let mut inner = outer.scope("> ", &answers);
            assert_eq!(inner.depth(), 2);

            inner.print("note");
            assert_eq!(inner.read_line("name").unwrap(), "hi");
            assert_eq!(root.reads(), 1);
        }

        assert_eq!(renderer.printed(), ["| > note"]);
        assert_eq!(renderer.prompts(), ["| > name"]);
    }

    #[test]
    fn missing_sibling_fails_loudly() {
        let mut renderer = ScriptedRenderer::new();
        let mut answers = Answers::new();
        answers.insert("known", true);

        let mut root = Context::new(&mut renderer);
        let cx = root.scope("", &answers);
        assert_eq!(cx.answer("known").unwrap(), &Answer::Bool(true));
        assert!(matches!(
            cx.answer("later"),
            Err(InterviewError::MissingAnswer(name)) if name == "later"
        ));
    }

    #[test]
    fn read_abort_becomes_user_exit() {
        let mut renderer = ScriptedRenderer::new().with_interrupt();
        let mut cx = Context::new(&mut renderer);

        let err = cx.read_line("anything").unwrap_err();
        assert_eq!(err.abort_kind(), Some(AbortKind::SoftInterrupt));
    }
}
