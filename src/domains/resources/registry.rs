//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{ApiDocsResource, ConnectionResource, ResourceDefinition};
use super::service::ResourceEntry;
use crate::core::config::ActitimeConfig;

/// Helper function to create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>(config: &ActitimeConfig) -> ResourceEntry {
    let mut raw = RawResource::new(R::uri(config), R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::render(config),
    }
}

/// Get all registered resources as ResourceEntries, in listing order.
pub fn get_all_resources(config: &ActitimeConfig) -> Vec<ResourceEntry> {
    vec![
        build_resource::<ApiDocsResource>(config),
        build_resource::<ConnectionResource>(config),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ActitimeConfig {
        ActitimeConfig {
            company: "acme".to_string(),
            base_url: "https://online.actitime.com/acme/api/v1".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources(&config());

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert_eq!(uris, vec!["actitime://docs/api", "actitime://config/acme"]);
        for entry in &resources {
            assert_eq!(entry.resource.raw.mime_type.as_deref(), Some("text/plain"));
            assert!(entry.resource.raw.description.is_some());
        }
    }
}
