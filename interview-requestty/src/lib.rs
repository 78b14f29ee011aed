//! Requestty renderer for interview.
//!
//! This crate provides a command-line renderer for running interviews
//! using the `requestty` library.
//!
//! # Example
//!
//! ```no_run
//! use interview::{Int, Interview, Str};
//! use interview_requestty::RequesttyRenderer;
//!
//! fn main() -> anyhow::Result<()> {
//!     let answers = Interview::new()
//!         .question("name", Str::new("What is your name?"))?
//!         .question("age", Int::new("How old are you?"))?
//!         .run(&mut RequesttyRenderer::new())?;
//!
//!     println!(
//!         "Hello, {} ({} years old)!",
//!         answers.get_string("name")?,
//!         answers.get_int("age")?
//!     );
//!     Ok(())
//! }
//! ```

mod renderer;

pub use renderer::RequesttyError;
pub use renderer::RequesttyRenderer;
