//! Interactive showcase
//!
//! Demonstrates:
//! - Valid-if rules with custom messages
//! - A tuple of unique numbers, flattened out of an indented sub-interview
//! - Sign checks on numeric questions
//! - A dynamic question whose default comes from an earlier answer
//! - A sub-interview kept only if an earlier answer is truthy
//!
//! Run with: cargo run -p interview-requestty --example showcase
//! Set `RUST_LOG=interview=debug` to see evaluation events on stderr.

use interview::{
    Dynamic, Float, Int, Interview, InterviewError, Label, NumericQuestion, QuestionExt, Str,
    Tuple, YesNo,
};
use interview_requestty::RequesttyRenderer;
use tracing_subscriber::EnvFilter;

fn favorite_numbers() -> Result<Interview, InterviewError> {
    Interview::new()
        .with_indent("| ")
        .question(
            "label",
            Label::new("Enter your favorite numbers, Ctrl+D to finish"),
        )?
        .question(
            "tup",
            Tuple::new(|items: &[i64]| Int::new(Tuple::default_item_text(items)))
                .min_items(1)
                .ensure_unique(true),
        )
}

fn product() -> Result<Interview, InterviewError> {
    Ok(Interview::new()
        .with_indent("| ")
        .question("label", Label::new("== Label =="))?
        .question("name", Str::new("Product name"))?
        .question("amt", Int::new("Product amount"))?
        .with_keep_if_previous_answer_truthy("start_subinterview"))
}

fn showcase() -> Result<Interview, InterviewError> {
    Interview::new()
        .question(
            "name",
            Str::new("What is your name")
                .with_default("default__value")
                .with_valid_if_not_empty_answer()
                .with_valid_if(
                    |_, answer: &String| answer.chars().count() % 2 == 0,
                    "answer len must be divisible by 2",
                ),
        )?
        .question("favorite_numbers", favorite_numbers()?.flatten_to("tup"))?
        .question("lvl", Int::new("What is your lvl"))?
        .question(
            "money",
            Float::new("Enter a fair amount").with_valid_if_positive(),
        )?
        .question(
            "default_for_next_question",
            YesNo::new("Choose next question's default").with_default(true),
        )?
        .question(
            "start_subinterview",
            Dynamic::new(|cx| {
                let default = cx.answers()?.get_bool("default_for_next_question")?;
                Ok(YesNo::new("Start a subinterview?").with_default(default))
            }),
        )?
        .question("subinterview", product()?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut interview = showcase()?;

    match interview.run(&mut RequesttyRenderer::new()) {
        Ok(answers) => {
            println!("{answers:#?}");
            Ok(())
        }
        Err(err) => match err.abort_kind() {
            Some(kind) => {
                eprintln!("{}", kind.marker());
                std::process::exit(err.exit_code());
            }
            None => Err(err.into()),
        },
    }
}
