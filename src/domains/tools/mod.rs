//! Tools domain module.
//!
//! Everything tool-related lives here: the static descriptor model, the
//! handler contract, layered credential resolution, the registry, and the
//! concrete tool definitions.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `descriptor.rs` - Name/description/input-schema triple per tool
//! - `credentials.rs` - Ordered credential-extraction strategies
//! - `handler.rs` - The `ToolHandler` contract and shared helpers
//! - `registry.rs` - Registration-ordered registry and CallTool dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct, `NAME`,
//!    `DESCRIPTION`, and a `ToolHandler` impl
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `registry.rs::build_registry`

pub mod credentials;
pub mod definitions;
mod descriptor;
mod error;
mod handler;
mod registry;

pub use credentials::{CredentialKeys, ResolvedCredentials};
pub use descriptor::ToolDescriptor;
pub use error::ToolError;
pub use handler::ToolHandler;
pub use registry::{ToolRegistry, build_registry};
