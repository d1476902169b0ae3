//! Sector/industry peers for a stock symbol.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::StockApi;

use super::STOCK_CREDENTIALS;

/// Parameters for the peer lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SimilarStocksParams {
    #[schemars(description = "Stock symbol (e.g., AAPL, TSLA)")]
    pub symbol: String,
}

/// Get similar stocks (same sector/industry) for a symbol.
pub struct SimilarStocksTool {
    api: Arc<dyn StockApi>,
}

impl SimilarStocksTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_similar_stocks";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get similar stocks for a given symbol (same sector/industry).";

    pub fn new(api: Arc<dyn StockApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for SimilarStocksTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<SimilarStocksParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&STOCK_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: SimilarStocksParams = parse_params(&args)?;
        let creds = STOCK_CREDENTIALS.resolve(&args)?;

        let peers = self.api.similar_stocks(&creds, &params.symbol).await?;
        json_content(&peers)
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::RawContent;
    use serde_json::json;

    use super::super::testing::{StubStocks, args_with_credentials};
    use super::*;

    #[tokio::test]
    async fn test_invoke_lists_peers() {
        let api = StubStocks::new();
        let tool = SimilarStocksTool::new(api.clone());

        let content = tool
            .invoke(args_with_credentials(json!({ "symbol": "AAPL" })))
            .await
            .unwrap();

        assert_eq!(
            api.similar_calls.load(std::sync::atomic::Ordering::SeqCst),
            1
        );
        let RawContent::Text(text) = &content[0].raw else {
            panic!("expected text content");
        };
        assert!(text.text.contains("MSFT"));
        // The note field is omitted entirely when peers were found.
        assert!(!text.text.contains("note"));
    }
}
