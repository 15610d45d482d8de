//! Server overview prompt, which reads the render context.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::prompts::{PromptContext, PromptError};

/// Ask the model to introduce this server to a user.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ServerOverviewArgs {
    /// Who the introduction is for
    #[serde(default)]
    pub audience: Option<String>,
}

pub async fn server_overview(
    args: ServerOverviewArgs,
    context: Option<PromptContext>,
) -> Result<String, PromptError> {
    let server = context
        .map(|ctx| format!("{} v{}", ctx.server_name, ctx.server_version))
        .unwrap_or_else(|| "this server".to_string());
    let audience = args.audience.unwrap_or_else(|| "a new user".to_string());

    Ok(format!(
        "Introduce {server} to {audience}. Explain that it serves reusable prompts \
         over the Model Context Protocol, and suggest how to list and use them."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_overview_uses_context() {
        let text = server_overview(
            ServerOverviewArgs { audience: None },
            Some(PromptContext::new("prompts", "1.2.3")),
        )
        .await
        .unwrap();
        assert!(text.contains("prompts v1.2.3"));
        assert!(text.contains("a new user"));
    }

    #[tokio::test]
    async fn test_server_overview_without_context() {
        let text = server_overview(
            ServerOverviewArgs {
                audience: Some("operators".to_string()),
            },
            None,
        )
        .await
        .unwrap();
        assert!(text.starts_with("Introduce this server to operators"));
    }
}
