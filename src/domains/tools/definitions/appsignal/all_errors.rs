//! List open exception incidents from AppSignal.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::AppSignalApi;

use super::{APPSIGNAL_CREDENTIALS, default_limit};

/// Parameters for the exception incident listing.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAllErrorsParams {
    #[schemars(description = "Number of incidents to fetch (default: 100)")]
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[schemars(description = "Offset for pagination (default: 0)")]
    #[serde(default)]
    pub offset: i64,
}

/// Get all open exception incidents for an app.
pub struct GetAllErrorsTool {
    api: Arc<dyn AppSignalApi>,
}

impl GetAllErrorsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_appsignal_all_errors";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get all open exception incidents from AppSignal.";

    pub fn new(api: Arc<dyn AppSignalApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetAllErrorsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<GetAllErrorsParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&APPSIGNAL_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: GetAllErrorsParams = parse_params(&args)?;
        let creds = APPSIGNAL_CREDENTIALS.resolve(&args)?;

        let result = self
            .api
            .exception_incidents(&creds, params.limit, params.offset)
            .await?;

        json_content(&result)
    }
}
