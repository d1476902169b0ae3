//! Upstream service adapters.
//!
//! Each adapter wraps one external API behind a trait so that tool handlers
//! depend on a narrow call signature instead of a concrete HTTP client.
//! Adapters receive already-validated parameters plus a resolved credential
//! pair and report failures as [`UpstreamError`]; they never retry and never
//! reinterpret an upstream response.

pub mod appsignal;
pub mod error;
pub mod stocks;

pub use appsignal::{AppSignalApi, AppSignalClient};
pub use error::UpstreamError;
pub use stocks::{StockApi, StockClient};
