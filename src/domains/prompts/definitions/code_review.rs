//! Code review prompt definition.

use super::{PromptDefinition, arg};
use rmcp::model::PromptArgument;

/// Review a snippet of code.
pub struct CodeReviewPrompt;

impl PromptDefinition for CodeReviewPrompt {
    const NAME: &'static str = "code_review";
    const DESCRIPTION: &'static str = "Review a piece of code for defects and style";
    const TAGS: &'static [&'static str] = &["code", "review"];

    fn template() -> &'static str {
        r#"Review this {{language}} code{{#if context}} taken from {{context}}{{/if}}.

```{{language}}
{{code}}
```

{{#if focus}}
Concentrate on {{focus}}. Mention other problems only if they are serious.
{{else}}
Report, in order of severity:
- correctness bugs and unhandled edge cases
- unsafe or insecure constructs
- needless complexity or duplication
- naming and readability issues
{{/if}}
Quote the relevant line for every finding."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            arg("language", "Programming language of the code", true),
            arg("code", "The code to review", true),
            arg("focus", "Area to concentrate on (e.g. security, performance)", false),
            arg("context", "Where the code comes from (file, module, project)", false),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_review_prompt_metadata() {
        assert_eq!(CodeReviewPrompt::NAME, "code_review");
        assert!(CodeReviewPrompt::TAGS.contains(&"review"));

        let args = CodeReviewPrompt::arguments();
        assert_eq!(args.len(), 4);
        assert_eq!(args[0].required, Some(true));
        assert_eq!(args[1].required, Some(true));
        assert_eq!(args[2].required, Some(false));
    }
}
