//! Built-in prompt definitions.
//!
//! Two kinds of prompt live here:
//! - declarative templates, implementing [`PromptDefinition`]
//! - async functions over a typed argument struct, registered with
//!   `PromptManager::add_prompt_from_fn`
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement `PromptDefinition`, or write an async function
//! 3. Export it here
//! 4. Register in `registry.rs`

mod code_review;
mod commit_message;
mod server_overview;
mod summarize;

use rmcp::model::PromptArgument;

pub use code_review::CodeReviewPrompt;
pub use commit_message::CommitMessagePrompt;
pub use server_overview::{ServerOverviewArgs, server_overview};
pub use summarize::{SummarizeArgs, summarize};

/// Trait for template-backed prompt definitions.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// Tags used to group the prompt.
    const TAGS: &'static [&'static str] = &[];

    /// The template string with {{variable}} placeholders.
    fn template() -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;
}

/// Shorthand for a described argument.
pub(crate) fn arg(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(required),
    }
}
