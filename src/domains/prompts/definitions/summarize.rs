//! Summarize prompt, built from a function.

use rmcp::model::PromptMessageRole;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::prompts::{Message, PromptError};

/// Summarize text or content.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SummarizeArgs {
    /// The content to summarize
    pub content: String,

    /// Desired length: brief, medium, or detailed
    #[serde(default)]
    pub length: Option<String>,
}

pub async fn summarize(args: SummarizeArgs) -> Result<Vec<Message>, PromptError> {
    let length = match args.length.as_deref().map(str::trim) {
        None | Some("") => "medium",
        Some(length @ ("brief" | "medium" | "detailed")) => length,
        Some(other) => {
            return Err(PromptError::invalid_argument(
                "length",
                format!("expected brief, medium or detailed, got '{other}'"),
            ));
        }
    };

    Ok(vec![
        Message::new_text(
            PromptMessageRole::User,
            format!("Please write a {length} summary of the following content:\n\n{}", args.content),
        ),
        Message::new_text(
            PromptMessageRole::Assistant,
            "Here is the summary:".to_string(),
        ),
    ])
}
