//! Render context handed to prompts served over MCP.

use serde::{Deserialize, Serialize};

/// Per-request information the server passes to prompt renders.
///
/// The registry never inspects it; only prompts that ask for a context
/// receive it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptContext {
    /// Name of the serving MCP server.
    pub server_name: String,

    /// Version of the serving MCP server.
    pub server_version: String,
}

impl PromptContext {
    pub fn new(server_name: impl Into<String>, server_version: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            server_version: server_version.into(),
        }
    }
}
