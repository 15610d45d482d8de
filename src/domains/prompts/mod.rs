//! Prompts domain module.
//!
//! Prompts are named message templates that MCP clients can list and render
//! with arguments.
//!
//! ## Architecture
//!
//! - `prompt.rs` - The `Prompt` value and its render procedure
//! - `templates.rs` - Declarative template prompts
//! - `manager.rs` - `PromptManager`, the keyed registry with duplicate policy
//! - `policy.rs` - Duplicate-handling policies
//! - `definitions/` - Built-in prompts (one file per prompt)
//! - `registry.rs` - Registration of the built-in prompts
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file in `definitions/` (e.g., `my_prompt.rs`)
//! 2. Implement `PromptDefinition`, or write an async function
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`

mod context;
pub mod definitions;
mod error;
mod manager;
mod policy;
mod prompt;
mod registry;
pub mod templates;

pub use context::PromptContext;
pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use manager::PromptManager;
pub use policy::DuplicateBehavior;
pub use prompt::{Arguments, IntoMessages, Message, Prompt, RenderPrompt};
pub use registry::{builtin_prompt_names, register_builtin_prompts};
pub use templates::{PromptBuilder, PromptTemplate};
