//! Moving-average trend analysis for a stock symbol.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::handler::{json_content, parse_params};
use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler};
use crate::services::StockApi;

use super::STOCK_CREDENTIALS;

/// Parameters for the trend analysis.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockAnalysisParams {
    #[schemars(description = "Stock symbol (e.g., AAPL, TSLA)")]
    pub symbol: String,
}

/// Get a BUY/SELL/HOLD recommendation based on six months of closes.
pub struct StockAnalysisTool {
    api: Arc<dyn StockApi>,
}

impl StockAnalysisTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_stock_analysis";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get a detailed analysis and recommendation (BUY/SELL/HOLD) for a stock symbol.";

    pub fn new(api: Arc<dyn StockApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for StockAnalysisTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new::<StockAnalysisParams>(Self::NAME, Self::DESCRIPTION)
            .with_credential_args(&STOCK_CREDENTIALS)
    }

    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError> {
        let params: StockAnalysisParams = parse_params(&args)?;
        let creds = STOCK_CREDENTIALS.resolve(&args)?;

        let analysis = self.api.stock_analysis(&creds, &params.symbol).await?;
        json_content(&analysis)
    }
}
