//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Duplicate-handling policy: warn, error, replace or ignore.
    /// Validated when the prompt manager is built; `None` means warn.
    pub duplicate_behavior: Option<String>,

    /// Whether the built-in prompts are registered at startup.
    #[serde(default = "default_builtins")]
    pub register_builtins: bool,
}

fn default_builtins() -> bool {
    true
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            duplicate_behavior: None,
            register_builtins: default_builtins(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-prompt-registry".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            prompts: PromptsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables (and `.env`, if any).
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(policy) = std::env::var("MCP_PROMPTS_DUPLICATE_BEHAVIOR") {
            info!("Prompt duplicate behavior set to '{}'", policy);
            config.prompts.duplicate_behavior = Some(policy);
        }

        if let Ok(builtins) = std::env::var("MCP_PROMPTS_BUILTINS") {
            config.prompts.register_builtins = !matches!(builtins.to_lowercase().as_str(), "false" | "0");
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_duplicate_behavior_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_PROMPTS_DUPLICATE_BEHAVIOR", "ignore");
        }
        let config = Config::from_env();
        assert_eq!(config.prompts.duplicate_behavior.as_deref(), Some("ignore"));
        unsafe {
            std::env::remove_var("MCP_PROMPTS_DUPLICATE_BEHAVIOR");
        }
    }

    #[test]
    fn test_duplicate_behavior_unset() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_PROMPTS_DUPLICATE_BEHAVIOR");
        }
        let config = Config::from_env();
        assert!(config.prompts.duplicate_behavior.is_none());
    }

    #[test]
    fn test_builtins_can_be_disabled() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_PROMPTS_BUILTINS", "false");
        }
        let config = Config::from_env();
        assert!(!config.prompts.register_builtins);
        unsafe {
            std::env::remove_var("MCP_PROMPTS_BUILTINS");
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.name, "mcp-prompt-registry");
        assert!(config.prompts.register_builtins);
        assert_eq!(config.logging.level, "info");
    }
}
