//! Tool registry and dispatch.
//!
//! The registry is the only process-wide shared state: a
//! registration-ordered map from tool name to handler, fully built before
//! the server starts serving and read-only afterwards. Dispatch implements
//! the CallTool state machine (argument-shape validation, lookup,
//! invocation under a timeout) and contains every handler failure as an
//! error response; a failing tool never takes the dispatcher down.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use tracing::{error, warn};

use crate::core::config::Config;
use crate::services::{AppSignalClient, StockClient};

use super::definitions::{
    GetAllErrorsTool, GetAllIncidentsTool, GetIncidentDetailsTool, SearchErrorsTool,
    SimilarStocksTool, StockAnalysisTool, StockDetailsTool, StockNewsTool,
};
use super::error::ToolError;
use super::handler::ToolHandler;

/// Default bound on a single tool invocation.
pub const DEFAULT_INVOKE_TIMEOUT: Duration = Duration::from_secs(30);

/// Registration-ordered tool registry.
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<&'static str, usize>,
    invoke_timeout: Duration,
}

impl ToolRegistry {
    /// Create an empty registry with the default invocation timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_INVOKE_TIMEOUT)
    }

    /// Create an empty registry with a custom invocation timeout.
    pub fn with_timeout(invoke_timeout: Duration) -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
            invoke_timeout,
        }
    }

    /// Register a handler under its own name.
    ///
    /// A duplicate name is a startup bug: it is rejected with an error
    /// instead of silently overwriting the earlier handler.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let name = handler.name();
        if self.index.contains_key(name) {
            return Err(ToolError::duplicate(name));
        }
        self.index.insert(name, self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    /// Look up a handler by name. Total: absent names return `None`.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&i| &self.handlers[i])
    }

    /// Tool metadata, in registration order.
    pub fn list(&self) -> Vec<Tool> {
        self.handlers
            .iter()
            .map(|handler| handler.descriptor().to_tool())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Dispatch one CallTool request.
    ///
    /// Validation order: the arguments must be a JSON object (absent counts
    /// as empty) before any lookup happens; an unknown name fails before
    /// any handler code runs. Failures raised by the handler are logged
    /// with full detail and converted into an error response carrying only
    /// the failure's public message.
    pub async fn dispatch(&self, name: &str, arguments: Option<Value>) -> CallToolResult {
        let args = match arguments {
            None => JsonObject::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                warn!(tool = name, "rejected call: arguments are not an object");
                return error_result(&ToolError::invalid_arguments(format!(
                    "arguments must be an object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let Some(handler) = self.lookup(name) else {
            warn!(tool = name, "unknown tool requested");
            return error_result(&ToolError::not_found(name));
        };

        match tokio::time::timeout(self.invoke_timeout, handler.invoke(args)).await {
            Ok(Ok(content)) => CallToolResult::success(content),
            Ok(Err(err)) => {
                error!(tool = name, error = ?err, "tool call failed");
                error_result(&err)
            }
            Err(_) => {
                error!(tool = name, timeout = ?self.invoke_timeout, "tool call timed out");
                error_result(&ToolError::Timeout)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the registry with every tool wired to its production client.
///
/// Registration order is the order tools appear in ListTools responses.
pub fn build_registry(config: &Config) -> Result<ToolRegistry, ToolError> {
    let appsignal = Arc::new(AppSignalClient::new(config.upstream.appsignal_url.clone()));
    let stocks = Arc::new(StockClient::new(
        config.upstream.market_data_url.clone(),
        config.upstream.news_url.clone(),
    ));

    let mut registry =
        ToolRegistry::with_timeout(Duration::from_secs(config.tools.invoke_timeout_secs));

    registry.register(Arc::new(SearchErrorsTool::new(appsignal.clone())))?;
    registry.register(Arc::new(GetAllErrorsTool::new(appsignal.clone())))?;
    registry.register(Arc::new(GetIncidentDetailsTool::new(appsignal.clone())))?;
    registry.register(Arc::new(GetAllIncidentsTool::new(appsignal)))?;

    registry.register(Arc::new(StockDetailsTool::new(stocks.clone())))?;
    registry.register(Arc::new(StockNewsTool::new(stocks.clone())))?;
    registry.register(Arc::new(SimilarStocksTool::new(stocks.clone())))?;
    registry.register(Arc::new(StockAnalysisTool::new(stocks)))?;

    Ok(registry)
}

fn error_result(err: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.public_message())])
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
