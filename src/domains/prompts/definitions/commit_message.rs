//! Commit message prompt definition.

use super::{PromptDefinition, arg};
use rmcp::model::PromptArgument;

/// Draft a commit message for a diff.
pub struct CommitMessagePrompt;

impl PromptDefinition for CommitMessagePrompt {
    const NAME: &'static str = "commit_message";
    const DESCRIPTION: &'static str = "Draft a commit message describing a diff";
    const TAGS: &'static [&'static str] = &["code", "git"];

    fn template() -> &'static str {
        r#"Write a commit message for the following change.
{{#if convention}}Follow the {{convention}} convention.{{else}}Use a short imperative subject line, a blank line, then a wrapped body.{{/if}}

{{diff}}"#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            arg("diff", "Unified diff of the change", true),
            arg("convention", "Commit convention to follow (e.g. conventional commits)", false),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_message_prompt_metadata() {
        assert_eq!(CommitMessagePrompt::NAME, "commit_message");
        let args = CommitMessagePrompt::arguments();
        assert_eq!(args[0].name, "diff");
        assert_eq!(args[0].required, Some(true));
        assert!(CommitMessagePrompt::template().contains("{{diff}}"));
    }
}
