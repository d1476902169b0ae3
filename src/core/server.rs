//! MCP Server implementation and lifecycle management.
//!
//! The server handler implements the MCP protocol by delegating to the
//! tool registry: ListTools maps the registry in registration order,
//! CallTool routes through the registry's dispatch. The registry is built
//! once here, before any transport starts serving, and shared read-only.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::tools::{ToolRegistry, build_registry};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry of every tool, built at startup and never mutated.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the tool registry cannot be built (for example, on a
    /// duplicate tool name); that is an unrecoverable startup error.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let config = Arc::new(config);
        let registry = Arc::new(build_registry(&config)?);

        Ok(Self { config, registry })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Exposes AppSignal error-tracking queries and stock quote/news/analysis \
                 tools. Credentials are passed per call, either as a credentials object \
                 or as flat legacy arguments."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.list(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let arguments = request.arguments.map(Value::Object);
        Ok(self.registry.dispatch(&request.name, arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_builds_with_defaults() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "insight-mcp-server");
        assert_eq!(server.registry().len(), 8);
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }
}
