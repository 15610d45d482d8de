//! STDIO transport implementation.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single MCP session over stdin/stdout until the client leaves.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            "Ready - serving {} prompts via stdin/stdout",
            server.prompt_manager().len()
        );

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        session
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("STDIO session finished");
        Ok(())
    }
}
