use interview_types::{AbortKind, InterviewError};
use tracing::debug;

use crate::{Context, Outcome, Question, Transformation, invoke_subquestion};

/// Default message printed when an item repeats and uniqueness is requested.
pub const NOT_UNIQUE_MESSAGE: &str = "You already provided this item, unique values are requested.";

type ItemFactory<T> = Box<dyn FnMut(&[T]) -> Box<dyn Question<Output = T>>>;

/// Collects a variable number of items by asking an item question repeatedly.
///
/// Each round builds a fresh item question from the items collected so far,
/// so prompts can number themselves (see [`Tuple::default_item_text`]).
/// Collection stops when `max_items` is reached, when an item meets the end
/// condition, or when the user aborts through a channel this tuple is
/// configured to accept as "done". Ending below `min_items` prints a message
/// and keeps asking instead.
pub struct Tuple<T> {
    make_item_question: ItemFactory<T>,
    end_condition: Box<dyn Fn(&T) -> bool>,
    end_on_stream_end: bool,
    end_on_soft_interrupt: bool,
    ensure_unique: bool,
    min_items: usize,
    max_items: usize,
    propagate_item_skip: bool,
    too_few_message: Option<String>,
    not_unique_message: String,
    transformations: Vec<Transformation<Vec<T>>>,
}

impl<T: PartialEq + 'static> Tuple<T> {
    /// Create a collector asking `make_item_question(items_so_far)` each round.
    ///
    /// Defaults: no end condition, end of input finishes, interrupts
    /// propagate, duplicates allowed, no bounds, skipped items skip the tuple.
    pub fn new<Q, F>(mut make_item_question: F) -> Self
    where
        F: FnMut(&[T]) -> Q + 'static,
        Q: Question<Output = T> + 'static,
    {
        Self {
            make_item_question: Box::new(move |items: &[T]| {
                let question: Box<dyn Question<Output = T>> = Box::new(make_item_question(items));
                question
            }),
            end_condition: Box::new(|_| false),
            end_on_stream_end: true,
            end_on_soft_interrupt: false,
            ensure_unique: false,
            min_items: 0,
            max_items: usize::MAX,
            propagate_item_skip: true,
            too_few_message: None,
            not_unique_message: NOT_UNIQUE_MESSAGE.to_string(),
            transformations: Vec::new(),
        }
    }
}

impl<T> Tuple<T> {
    /// Finish collecting when an item satisfies `end_condition`.
    ///
    /// The terminating item itself is not collected.
    pub fn end_condition<F>(mut self, end_condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.end_condition = Box::new(end_condition);
        self
    }

    /// Whether end of input (Ctrl+D) finishes collecting instead of aborting.
    pub fn end_on_stream_end(mut self, enabled: bool) -> Self {
        self.end_on_stream_end = enabled;
        self
    }

    /// Whether an interrupt (Ctrl+C) finishes collecting instead of aborting.
    pub fn end_on_soft_interrupt(mut self, enabled: bool) -> Self {
        self.end_on_soft_interrupt = enabled;
        self
    }

    /// Reject items equal to one already collected.
    pub fn ensure_unique(mut self, enabled: bool) -> Self {
        self.ensure_unique = enabled;
        self
    }

    pub fn min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }

    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Whether a skipped item skips the whole tuple.
    ///
    /// When disabled, a skipped item is dropped and the next one is asked,
    /// as long as the skipped item read input. An item skipped without
    /// reading ends collection, or skips the tuple below `min_items`.
    pub fn propagate_item_skip(mut self, enabled: bool) -> Self {
        self.propagate_item_skip = enabled;
        self
    }

    pub fn too_few_message(mut self, message: impl Into<String>) -> Self {
        self.too_few_message = Some(message.into());
        self
    }

    pub fn not_unique_message(mut self, message: impl Into<String>) -> Self {
        self.not_unique_message = message.into();
        self
    }

    /// Positional prompt for the next item, e.g. `[2]` after two items.
    pub fn default_item_text(items_so_far: &[T]) -> String {
        format!("[{}]", items_so_far.len())
    }

    fn ends_on(&self, kind: AbortKind) -> bool {
        match kind {
            AbortKind::StreamEnd => self.end_on_stream_end,
            AbortKind::SoftInterrupt => self.end_on_soft_interrupt,
        }
    }

    fn reject_too_few(&self, cx: &mut Context<'_>, collected: usize) {
        debug!(collected, min_items = self.min_items, "too few items");
        let message = match &self.too_few_message {
            Some(message) => message.clone(),
            None => format!("You must input at least {} item(s)", self.min_items),
        };
        cx.print(&message);
    }
}

impl<T: PartialEq> Question for Tuple<T> {
    type Output = Vec<T>;

    fn ask(&mut self, cx: &mut Context<'_>) -> Result<Outcome<Vec<T>>, InterviewError> {
        let mut items: Vec<T> = Vec::new();

        loop {
            if items.len() >= self.max_items {
                break;
            }

            let reads_before = cx.reads();
            let mut question = (self.make_item_question)(&items);
            let item = match invoke_subquestion(question.as_mut(), cx) {
                Ok(Outcome::Answered(item)) => item,
                Ok(Outcome::Skipped) if self.propagate_item_skip => {
                    debug!(collected = items.len(), "item skipped, skipping tuple");
                    return Ok(Outcome::Skipped);
                }
                // Without a read the user has no way to stop the loop.
                Ok(Outcome::Skipped) if cx.reads() == reads_before => {
                    debug!(collected = items.len(), "item skipped without input");
                    if items.len() < self.min_items {
                        return Ok(Outcome::Skipped);
                    }
                    break;
                }
                Ok(Outcome::Skipped) => continue,
                Err(InterviewError::UserExit(kind)) if self.ends_on(kind) => {
                    if items.len() < self.min_items {
                        self.reject_too_few(cx, items.len());
                        continue;
                    }
                    debug!(%kind, collected = items.len(), "abort ends collection");
                    break;
                }
                Err(err) => return Err(err),
            };

            if (self.end_condition)(&item) {
                if items.len() < self.min_items {
                    self.reject_too_few(cx, items.len());
                    continue;
                }
                break;
            }

            if self.ensure_unique && items.contains(&item) {
                debug!(collected = items.len(), "duplicate item");
                cx.print(&self.not_unique_message);
                continue;
            }

            items.push(item);
        }

        Ok(Outcome::Answered(items))
    }

    fn transformations(&self) -> &[Transformation<Vec<T>>] {
        &self.transformations
    }

    fn transformations_mut(&mut self) -> &mut Vec<Transformation<Vec<T>>> {
        &mut self.transformations
    }
}
