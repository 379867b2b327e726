//! Tools domain module.
//!
//! Tools are the actiTIME operations exposed to MCP clients. Each tool wraps
//! exactly one API call and returns its result as text.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, one file per API area
//! - `handlers.rs` - The `ActitimeTool` trait and type-erased `ToolEntry`
//! - `registry.rs` - Name-keyed dispatch table shared by all transports
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a unit struct implementing `ActitimeTool` in the matching
//!    `definitions/` file
//! 2. List it in that file's `tools()` function
//!
//! The registry picks it up from there for every transport.

pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use error::{ToolError, ToolResult};
pub use handlers::{ActitimeTool, ToolEntry, Validate, parse_params};
pub use registry::ToolRegistry;
