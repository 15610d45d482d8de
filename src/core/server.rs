//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! prompts protocol by delegating to the [`PromptManager`].
//!
//! The manager is fully populated before the server is built and is shared
//! read-only between connections afterwards.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        GetPromptRequestParam, GetPromptResult, ListPromptsResult, PaginatedRequestParam,
        Prompt as McpPrompt, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::prompts::{
    Arguments, PromptContext, PromptError, PromptManager, register_builtin_prompts,
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry of the prompts served to clients.
    prompts: Arc<PromptManager<PromptContext>>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the configured duplicate behavior is not recognized.
    pub fn new(config: Config) -> Result<Self> {
        let manager = PromptManager::from_policy(config.prompts.duplicate_behavior.as_deref())?;
        Self::with_prompt_manager(config, manager)
    }

    /// Create a server around an existing prompt manager.
    ///
    /// Built-in prompts, when enabled, are added through the manager's own
    /// duplicate policy.
    pub fn with_prompt_manager(
        config: Config,
        mut manager: PromptManager<PromptContext>,
    ) -> Result<Self> {
        if config.prompts.register_builtins {
            info!("Registering built-in prompts");
            register_builtin_prompts(&mut manager)?;
        }

        info!(
            "Prompt registry ready: {} prompts, duplicate behavior '{}'",
            manager.len(),
            manager.duplicate_behavior()
        );

        Ok(Self {
            config: Arc::new(config),
            prompts: Arc::new(manager),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn prompt_manager(&self) -> &PromptManager<PromptContext> {
        &self.prompts
    }

    /// The context handed to every prompt rendered by this server.
    pub fn prompt_context(&self) -> PromptContext {
        PromptContext::new(self.name(), self.version())
    }

    /// List all available prompts.
    pub fn list_prompts(&self) -> Vec<McpPrompt> {
        self.prompts.list_mcp_prompts()
    }

    /// Render a prompt into an MCP `prompts/get` result.
    pub async fn render_prompt(
        &self,
        name: &str,
        arguments: Option<Arguments>,
    ) -> std::result::Result<GetPromptResult, PromptError> {
        let context = self.prompt_context();
        let messages = self
            .prompts
            .render_prompt(name, arguments, Some(&context))
            .await?;

        Ok(GetPromptResult {
            description: self
                .prompts
                .get_prompt(name)
                .and_then(|p| p.description().map(str::to_string)),
            messages,
        })
    }
}

/// Map a prompt failure onto the MCP error space.
fn to_mcp_error(err: PromptError) -> McpError {
    if err.is_client_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This server hosts a registry of reusable prompts. List them with prompts/list \
                 and render one with prompts/get."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_prompts().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: McpServer::list_prompts(self),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        McpServer::render_prompt(self, &request.name, request.arguments)
            .await
            .map_err(to_mcp_error)
    }
}
