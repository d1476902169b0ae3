//! Quote details for a stock symbol.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::StockApi;

use super::STOCK_CREDENTIALS;

/// Parameters for the quote detail lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockDetailsParams {
    #[schemars(description = "Stock symbol (e.g., AAPL, TSLA)")]
    pub symbol: String,
}

/// Get price, market cap, PE ratio and company profile for a symbol.
pub struct StockDetailsTool {
    api: Arc<dyn StockApi>,
}

impl StockDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get details for a stock symbol (price, market cap, PE ratio, etc.).";

    pub fn new(api: Arc<dyn StockApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for StockDetailsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<StockDetailsParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&STOCK_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: StockDetailsParams = parse_params(&args)?;
        let creds = STOCK_CREDENTIALS.resolve(&args)?;

        let details = self.api.stock_details(&creds, &params.symbol).await?;
        json_content(&details)
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::RawContent;
    use serde_json::json;

    use super::super::testing::{StubStocks, args_with_credentials};
    use super::*;

    #[test]
    fn test_symbol_is_required() {
        let err = serde_json::from_str::<StockDetailsParams>("{}").unwrap_err();
        assert!(err.to_string().contains("symbol"));
    }

    #[tokio::test]
    async fn test_invoke_serializes_the_details() {
        let api = StubStocks::new();
        let tool = StockDetailsTool::new(api.clone());

        let content = tool
            .invoke(args_with_credentials(json!({ "symbol": "aapl" })))
            .await
            .unwrap();

        assert_eq!(api.details_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        let RawContent::Text(text) = &content[0].raw else {
            panic!("expected text content");
        };
        assert!(text.text.contains("\"symbol\": \"AAPL\""));
        assert!(text.text.contains("\"pe_ratio\": 29.1"));
    }

    #[tokio::test]
    async fn test_missing_credentials_name_the_api_key() {
        let api = StubStocks::new();
        let tool = StockDetailsTool::new(api.clone());

        let args = json!({ "symbol": "AAPL" }).as_object().unwrap().clone();
        let err = tool.invoke(args).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingCredential("api_key")));
    }
}
