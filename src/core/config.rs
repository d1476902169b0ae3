//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults. Credentials are not
//! configured here: they arrive per call and are resolved by the tools
//! domain.

use serde::{Deserialize, Serialize};

use super::transport::TransportConfig;
use crate::services::appsignal;
use crate::services::stocks;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Tool invocation configuration.
    pub tools: ToolsConfig,

    /// Upstream API endpoints.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Tool invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Upper bound on a single tool invocation, in seconds. A stalled
    /// upstream call is cut off here instead of stalling the dispatcher.
    pub invoke_timeout_secs: u64,
}

/// Upstream API endpoints, overridable for testing against fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// AppSignal GraphQL endpoint.
    pub appsignal_url: String,

    /// Market-data base URL (quote summary and chart endpoints).
    pub market_data_url: String,

    /// News search endpoint.
    pub news_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "insight-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            tools: ToolsConfig {
                invoke_timeout_secs: 30,
            },
            upstream: UpstreamConfig {
                appsignal_url: appsignal::DEFAULT_BASE_URL.to_string(),
                market_data_url: stocks::DEFAULT_MARKET_DATA_URL.to_string(),
                news_url: stocks::DEFAULT_NEWS_URL.to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `MCP_`, e.g.
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TOOL_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timeout) = std::env::var("MCP_TOOL_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.tools.invoke_timeout_secs = secs;
            }
        }

        if let Ok(url) = std::env::var("MCP_APPSIGNAL_URL") {
            config.upstream.appsignal_url = url;
        }

        if let Ok(url) = std::env::var("MCP_MARKET_DATA_URL") {
            config.upstream.market_data_url = url;
        }

        if let Ok(url) = std::env::var("MCP_NEWS_URL") {
            config.upstream.news_url = url;
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
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "insight-mcp-server");
        assert_eq!(config.tools.invoke_timeout_secs, 30);
        assert_eq!(config.upstream.appsignal_url, "https://appsignal.com/graphql");
    }

    #[test]
    fn test_timeout_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.invoke_timeout_secs, 5);
        unsafe {
            std::env::remove_var("MCP_TOOL_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_unparsable_timeout_keeps_the_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.invoke_timeout_secs, 30);
        unsafe {
            std::env::remove_var("MCP_TOOL_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_upstream_overrides_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_APPSIGNAL_URL", "http://127.0.0.1:9999/graphql");
        }
        let config = Config::from_env();
        assert_eq!(config.upstream.appsignal_url, "http://127.0.0.1:9999/graphql");
        unsafe {
            std::env::remove_var("MCP_APPSIGNAL_URL");
        }
    }
}
