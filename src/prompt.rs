use inquire::{required, Confirm, InquireError, Text};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Prompt for '{question}' failed")]
    #[diagnostic(
        code(hako::prompt::inquire),
        help("Interactive mode needs a terminal, rerun without --interactive")
    )]
    Inquire {
        question: String,
        #[source]
        source: InquireError,
    },
}

/// Asks where the project should be created, pre-filled with `default` when there is one.
pub fn get_destination(default: Option<&str>) -> Result<String, PromptError> {
    let question = "Destination directory:";

    let mut prompt = Text::new(question)
        .with_help_message("The directory is created if it does not exist")
        .with_validator(required!("destination is required"));

    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }

    prompt.prompt().map_err(|error| PromptError::Inquire {
        question: question.to_string(),
        source: error,
    })
}

/// Asks for a final go-ahead after the preview has been shown.
pub fn apply_changes() -> Result<bool, PromptError> {
    let question = "Write these files?";

    Confirm::new(question)
        .with_default(true)
        .with_help_message("Answering no leaves the destination untouched")
        .prompt()
        .map_err(|error| PromptError::Inquire {
            question: question.to_string(),
            source: error,
        })
}
