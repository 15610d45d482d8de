//! MCP Prompt Registry
//!
//! A Model Context Protocol (MCP) server that serves a registry of prompts.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **prompts**: Prompt definitions, the `PromptManager` registry and its
//!     duplicate-handling policy
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_prompt_registry::domains::prompts::{DuplicateBehavior, PromptError, PromptManager};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut prompts: PromptManager = PromptManager::new(DuplicateBehavior::Error);
//!     prompts.add_prompt_from_fn(
//!         |_: serde_json::Map<String, serde_json::Value>| async { Ok::<_, PromptError>("Say hello") },
//!         Some("hello"),
//!         None,
//!         None,
//!     )?;
//!
//!     let messages = prompts.render_prompt("hello", None, None).await?;
//!     assert_eq!(messages.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::prompts::{DuplicateBehavior, Prompt, PromptError, PromptManager};
