//! Search exception errors through the AppSignal Search GraphQL API.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::AppSignalApi;

use super::APPSIGNAL_CREDENTIALS;

/// Parameters for the error search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchErrorsParams {
    /// Organization to search in.
    #[schemars(description = "AppSignal organization slug")]
    #[serde(rename = "__organization_slug__")]
    pub organization_slug: String,

    #[schemars(description = "Search query string (optional)")]
    #[serde(default)]
    pub query_string: Option<String>,

    #[schemars(description = "Filter errors by namespace (optional)")]
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Search for exception errors across an AppSignal organization.
pub struct SearchErrorsTool {
    api: Arc<dyn AppSignalApi>,
}

impl SearchErrorsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_appsignal_errors";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Search for exception errors in AppSignal using the Search GraphQL API.";

    pub fn new(api: Arc<dyn AppSignalApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for SearchErrorsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<SearchErrorsParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&APPSIGNAL_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: SearchErrorsParams = parse_params(&args)?;
        let creds = APPSIGNAL_CREDENTIALS.resolve(&args)?;

        let result = self
            .api
            .search_errors(
                &creds,
                &params.organization_slug,
                params.query_string.as_deref(),
                params.namespace.as_deref(),
            )
            .await?;

        json_content(&result)
    }
}
