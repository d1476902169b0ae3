//! Recent news articles for a stock symbol.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::StockApi;

use super::STOCK_CREDENTIALS;

fn default_months() -> u32 {
    1
}

fn default_max_articles() -> u32 {
    10
}

/// Parameters for the news lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockNewsParams {
    #[schemars(description = "Stock symbol (e.g., AAPL, TSLA)")]
    pub symbol: String,

    #[schemars(description = "How many months back to search (default: 1)")]
    #[serde(default = "default_months")]
    pub months: u32,

    #[schemars(description = "Maximum number of articles (default: 10)")]
    #[serde(default = "default_max_articles")]
    pub max_articles: u32,
}

/// Get recent news for a symbol through NewsAPI.
pub struct StockNewsTool {
    api: Arc<dyn StockApi>,
}

impl StockNewsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_news";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get recent news for a stock symbol. Requires a NewsAPI key in the credentials.";

    pub fn new(api: Arc<dyn StockApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for StockNewsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<StockNewsParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&STOCK_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: StockNewsParams = parse_params(&args)?;
        let creds = STOCK_CREDENTIALS.resolve(&args)?;

        let articles = self
            .api
            .stock_news(&creds, &params.symbol, params.months, params.max_articles)
            .await?;

        json_content(&articles)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::{StubStocks, args_with_credentials};
    use super::*;

    #[test]
    fn test_params_defaults() {
        let params: StockNewsParams = serde_json::from_str(r#"{"symbol": "TSLA"}"#).unwrap();
        assert_eq!(params.months, 1);
        assert_eq!(params.max_articles, 10);
    }

    #[test]
    fn test_params_custom_window() {
        let params: StockNewsParams =
            serde_json::from_str(r#"{"symbol": "TSLA", "months": 3, "max_articles": 5}"#).unwrap();
        assert_eq!(params.months, 3);
        assert_eq!(params.max_articles, 5);
    }

    #[tokio::test]
    async fn test_invoke_returns_articles() {
        let api = StubStocks::new();
        let tool = StockNewsTool::new(api.clone());

        let content = tool
            .invoke(args_with_credentials(json!({ "symbol": "TSLA" })))
            .await
            .unwrap();

        assert_eq!(api.news_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(content.len(), 1);
    }
}
