//! actiTIME MCP Server Library
//!
//! This crate exposes the actiTIME time-tracking REST API to Model Context
//! Protocol clients: every API operation becomes an MCP tool, and two
//! read-only resources describe the API and the current connection.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **actitime**: Basic-auth HTTP client, one method per endpoint
//!   - **tools**: Tool registry and the tool definitions
//!   - **resources**: API documentation and connection resources
//!
//! # Example
//!
//! ```rust,no_run
//! use actitime_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("mycompany".to_string()))?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
