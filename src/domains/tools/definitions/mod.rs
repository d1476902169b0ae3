//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod appsignal;
pub mod stocks;

pub use appsignal::{
    GetAllErrorsParams, GetAllErrorsTool, GetAllIncidentsParams, GetAllIncidentsTool,
    GetIncidentDetailsParams, GetIncidentDetailsTool, SearchErrorsParams, SearchErrorsTool,
};
pub use stocks::{
    SimilarStocksParams, SimilarStocksTool, StockAnalysisParams, StockAnalysisTool,
    StockDetailsParams, StockDetailsTool, StockNewsParams, StockNewsTool,
};
