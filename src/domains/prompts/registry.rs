//! Registration of the built-in prompts.
//!
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `register_builtin_prompts()`

use std::collections::BTreeSet;

use super::context::PromptContext;
use super::definitions::{
    CodeReviewPrompt, CommitMessagePrompt, PromptDefinition, server_overview, summarize,
};
use super::error::PromptError;
use super::manager::PromptManager;
use super::prompt::Prompt;
use super::templates::PromptBuilder;

/// Build a template-backed prompt from a PromptDefinition.
fn build_template<P: PromptDefinition, C: Send + Sync + 'static>() -> Prompt<C> {
    P::arguments()
        .into_iter()
        .fold(PromptBuilder::new(P::NAME), PromptBuilder::argument)
        .description(P::DESCRIPTION)
        .template(P::template())
        .build::<C>()
        .with_tags(P::TAGS.iter().copied())
}

fn tags(names: &[&str]) -> Option<BTreeSet<String>> {
    Some(names.iter().map(|t| t.to_string()).collect())
}

/// Add every built-in prompt to `manager`.
///
/// Registration goes through the manager's duplicate policy, so prompts
/// already present under a built-in name are handled like any other clash.
pub fn register_builtin_prompts(manager: &mut PromptManager<PromptContext>) -> Result<(), PromptError> {
    manager.add_prompt(build_template::<CodeReviewPrompt, _>(), None)?;
    manager.add_prompt(build_template::<CommitMessagePrompt, _>(), None)?;
    manager.add_prompt_from_fn(summarize, None, None, tags(&["text"]))?;
    manager.add_prompt_from_fn_with_context(
        server_overview,
        None,
        Some("Introduce this server and the prompts it offers"),
        tags(&["meta"]),
    )?;
    Ok(())
}

/// Names of all built-in prompts.
pub fn builtin_prompt_names() -> Vec<&'static str> {
    vec![
        CodeReviewPrompt::NAME,
        CommitMessagePrompt::NAME,
        "summarize",
        "server_overview",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::DuplicateBehavior;
    use serde_json::json;

    fn builtin_manager() -> PromptManager<PromptContext> {
        let mut manager = PromptManager::new(DuplicateBehavior::Error);
        register_builtin_prompts(&mut manager).unwrap();
        manager
    }

    #[test]
    fn test_register_builtin_prompts() {
        let manager = builtin_manager();
        assert_eq!(manager.len(), builtin_prompt_names().len());
        for name in builtin_prompt_names() {
            assert!(manager.has_prompt(name), "missing {name}");
        }
    }

    #[test]
    fn test_builtin_metadata() {
        let manager = builtin_manager();
        let review = manager.get_prompt("code_review").unwrap();
        assert!(review.has_tag("review"));
        assert_eq!(review.arguments().len(), 4);

        let summarize = manager.get_prompt("summarize").unwrap();
        assert_eq!(summarize.description(), Some("Summarize text or content."));
        assert!(summarize.has_tag("text"));
    }

    #[test]
    fn test_registering_twice_under_error_policy_fails() {
        let mut manager = builtin_manager();
        let err = register_builtin_prompts(&mut manager).unwrap_err();
        assert!(matches!(err, PromptError::AlreadyExists(ref key) if key == "code_review"));
    }

    #[tokio::test]
    async fn test_render_builtin_template() {
        let manager = builtin_manager();
        let messages = manager
            .render_prompt(
                "code_review",
                json!({"language": "rust", "code": "fn main() {}", "focus": "safety"})
                    .as_object()
                    .cloned(),
                None,
            )
            .await
            .unwrap();

        let json = serde_json::to_value(&messages).unwrap();
        let text = json[0]["content"]["text"].as_str().unwrap();
        assert!(text.contains("```rust\nfn main() {}\n```"));
        assert!(text.contains("Concentrate on safety"));
        assert!(!text.contains("{{"));
    }

    #[tokio::test]
    async fn test_render_builtin_with_context() {
        let manager = builtin_manager();
        let ctx = PromptContext::new("demo", "0.9.0");
        let messages = manager
            .render_prompt("server_overview", None, Some(&ctx))
            .await
            .unwrap();

        let json = serde_json::to_value(&messages).unwrap();
        assert!(json[0]["content"]["text"].as_str().unwrap().contains("demo v0.9.0"));
    }
}
