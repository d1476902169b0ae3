//! List performance incidents from AppSignal.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::AppSignalApi;

use super::{APPSIGNAL_CREDENTIALS, default_limit};

/// Parameters for the performance incident listing.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAllIncidentsParams {
    #[schemars(description = "Number of incidents to fetch (default: 100)")]
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[schemars(description = "Offset for pagination (default: 0)")]
    #[serde(default)]
    pub offset: i64,

    #[schemars(description = "Incident state filter (optional)")]
    #[serde(default)]
    pub state: Option<String>,
}

/// Get all performance incidents for an app.
pub struct GetAllIncidentsTool {
    api: Arc<dyn AppSignalApi>,
}

impl GetAllIncidentsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_appsignal_all_incidents";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get all performance incidents from AppSignal.";

    pub fn new(api: Arc<dyn AppSignalApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetAllIncidentsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<GetAllIncidentsParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&APPSIGNAL_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: GetAllIncidentsParams = parse_params(&args)?;
        let creds = APPSIGNAL_CREDENTIALS.resolve(&args)?;

        let result = self
            .api
            .performance_incidents(&creds, params.limit, params.offset, params.state.as_deref())
            .await?;

        json_content(&result)
    }
}
