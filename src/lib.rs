//! MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing two
//! tool families over a shared dispatch core: AppSignal error-tracking
//! queries and stock quote/news/analysis lookups.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler, and the
//!   transport layer
//! - **domains::tools**: the dispatch core (descriptors, credential
//!   resolution, the handler contract, the registry) plus the concrete
//!   tool definitions
//! - **services**: upstream API adapters (AppSignal GraphQL, market data
//!   and news), consumed by the tools through narrow traits
//!
//! # Example
//!
//! ```rust,no_run
//! use insight_mcp_server::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod services;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
