//! Resource definitions module.
//!
//! Each resource is defined in its own file with:
//! - URI and metadata
//! - A text renderer over the connection settings
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod api_docs;
mod connection;

pub use api_docs::ApiDocsResource;
pub use connection::ConnectionResource;

use crate::core::config::ActitimeConfig;

/// Trait for resource definitions.
///
/// Resources are read-only views over the immutable connection settings,
/// so both the URI and the content are derived from [`ActitimeConfig`].
pub trait ResourceDefinition {
    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str = "text/plain";

    /// The unique URI of the resource.
    fn uri(config: &ActitimeConfig) -> String;

    /// Render the resource body.
    fn render(config: &ActitimeConfig) -> String;
}
