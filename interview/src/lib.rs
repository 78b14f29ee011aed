//! # interview
//!
//! Compose validated, skippable prompts into nested interviews. Renderer-agnostic.
//!
//! An [`Interview`] is an ordered set of named questions and is itself a
//! question, so interviews nest. Every question carries transformations:
//! keep-if rules decide whether it is asked at all, valid-if rules reject an
//! answer and ask again. Answers are collected into [`Answers`].
//!
//! ## Usage
//!
//! ```rust
//! use interview::{Answer, Float, Int, Interview, NumericQuestion, ScriptedRenderer, Tuple};
//!
//! let mut renderer = ScriptedRenderer::new().with_lines(["-1", "2.5", "4", "4", "9", "0"]);
//!
//! let answers = Interview::new()
//!     .question("price", Float::new("Price?").with_valid_if_positive())?
//!     .question(
//!         "numbers",
//!         Tuple::new(|items: &[i64]| Int::new(Tuple::default_item_text(items)))
//!             .ensure_unique(true)
//!             .end_condition(|n| *n == 0),
//!     )?
//!     .run(&mut renderer)?;
//!
//! assert_eq!(answers.get_float("price")?, 2.5);
//! assert_eq!(answers.get("numbers"), Some(&Answer::from(vec![4_i64, 9])));
//! # Ok::<(), interview::InterviewError>(())
//! ```
//!
//! ## Building blocks
//!
//! - Leaves: [`Str`], [`Int`], [`Float`], [`YesNo`], [`Label`]
//! - Composites: [`Interview`], [`Tuple`], [`Dynamic`], [`PostConvert`]
//! - Rules: [`KeepIf`], [`ValidIf`], attached through [`QuestionExt`]
//!
//! ## Renderers
//!
//! Anything implementing [`Renderer`] can drive an interview:
//! - [`ScriptedRenderer`] - replays a script, for tests
//! - `interview-requestty` - terminal prompts via requestty

pub use interview_types::*;

mod context;
mod dynamic;
mod interview;
mod leaf;
mod post_convert;
mod question;
mod scripted;
mod transformation;
mod tuple;

pub use context::Context;
pub use dynamic::Dynamic;
pub use interview::Interview;
pub use leaf::{
    EMPTY_ANSWER_MESSAGE, Float, INVALID_FLOAT_MESSAGE, INVALID_INT_MESSAGE, Int, Label,
    NumericQuestion, Str, YesNo,
};
pub use post_convert::PostConvert;
pub use question::{
    AnyQuestion, Outcome, Question, QuestionExt, ask_with_validation, evaluate, invoke_subquestion,
};
pub use scripted::{ScriptStep, ScriptedRenderer};
pub use transformation::{DEFAULT_INVALID_MESSAGE, KeepIf, Transformation, ValidIf};
pub use tuple::{NOT_UNIQUE_MESSAGE, Tuple};
