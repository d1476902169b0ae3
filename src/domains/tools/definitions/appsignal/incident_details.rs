//! Fetch details for a single AppSignal incident.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::AppSignalApi;

use super::APPSIGNAL_CREDENTIALS;

/// Parameters for the incident detail lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetIncidentDetailsParams {
    #[schemars(description = "Incident number")]
    pub incident_number: i64,

    #[schemars(description = "Sample ID (optional)")]
    #[serde(default)]
    pub sample_id: Option<String>,

    #[schemars(description = "Timestamp (optional)")]
    #[serde(default)]
    pub timestamp: Option<String>,

    #[schemars(description = "Time range array (optional)")]
    #[serde(default)]
    pub timerange: Option<Vec<String>>,
}

/// Get details for a specific incident, optionally narrowed to one sample.
pub struct GetIncidentDetailsTool {
    api: Arc<dyn AppSignalApi>,
}

impl GetIncidentDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_appsignal_incident_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get details for a specific incident in AppSignal.";

    pub fn new(api: Arc<dyn AppSignalApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetIncidentDetailsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<GetIncidentDetailsParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&APPSIGNAL_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: GetIncidentDetailsParams = parse_params(&args)?;
        let creds = APPSIGNAL_CREDENTIALS.resolve(&args)?;

        let result = self
            .api
            .incident_details(
                &creds,
                params.incident_number,
                params.sample_id.as_deref(),
                params.timestamp.as_deref(),
                params.timerange.as_deref(),
            )
            .await?;

        json_content(&result)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::{StubAppSignal, args_with_credentials};
    use super::*;

    #[test]
    fn test_incident_number_is_required() {
        let err = serde_json::from_str::<GetIncidentDetailsParams>("{}").unwrap_err();
        assert!(err.to_string().contains("incident_number"));
    }

    #[test]
    fn test_descriptor_requires_only_the_incident_number() {
        let tool = GetIncidentDetailsTool::new(StubAppSignal::new(json!({})));
        let schema = tool.descriptor().input_schema().clone();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "incident_number");
    }

    #[tokio::test]
    async fn test_invoke_forwards_the_sample_narrowing() {
        let api = StubAppSignal::new(json!({ "data": { "app": null } }));
        let tool = GetIncidentDetailsTool::new(api.clone());

        tool.invoke(args_with_credentials(json!({
            "incident_number": 42,
            "sample_id": "s-9",
            "timerange": ["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"]
        })))
        .await
        .unwrap();

        let variables = api.last_variables.lock().unwrap().clone().unwrap();
        assert_eq!(variables["incidentNumber"], 42);
        assert_eq!(variables["sampleId"], "s-9");
        assert_eq!(variables["timestamp"], json!(null));
        assert_eq!(
            variables["timerange"],
            json!(["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"])
        );
    }
}
