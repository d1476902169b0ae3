//! Stock quote, news, and analysis tools.
//!
//! Four tools over public market data and NewsAPI: quote details, recent
//! news, sector/industry peers, and a moving-average trend analysis. They
//! share one credential pair and one service adapter.

pub mod analysis;
pub mod details;
pub mod news;
pub mod similar;

pub use analysis::{StockAnalysisParams, StockAnalysisTool};
pub use details::{StockDetailsParams, StockDetailsTool};
pub use news::{StockNewsParams, StockNewsTool};
pub use similar::{SimilarStocksParams, SimilarStocksTool};

use crate::domains::tools::CredentialKeys;

/// Credential pair shared by every stock tool: the NewsAPI key and the
/// calling user's ID.
pub const STOCK_CREDENTIALS: CredentialKeys = CredentialKeys::new("api_key", "user_id");
