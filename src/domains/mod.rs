//! Domains module containing business logic organized by bounded contexts.
//!
//! - **actitime**: HTTP client for the actiTIME REST API
//! - **tools**: MCP tools, one per API operation
//! - **resources**: Read-only documents about the API and the connection

pub mod actitime;
pub mod resources;
pub mod tools;
