//! API overview resource definition.

use super::ResourceDefinition;
use crate::core::config::ActitimeConfig;

/// Short overview of the remote API this server talks to.
pub struct ApiDocsResource;

impl ResourceDefinition for ApiDocsResource {
    const NAME: &'static str = "actiTIME API Documentation";
    const DESCRIPTION: &'static str = "Information about the actiTIME API";

    fn uri(_config: &ActitimeConfig) -> String {
        "actitime://docs/api".to_string()
    }

    fn render(config: &ActitimeConfig) -> String {
        format!(
            "actiTIME API Documentation\n\
             \n\
             Base URL: {}\n\
             Company: {}\n\
             Authentication: Basic Auth\n\
             \n\
             Key Features:\n\
             - Time tracking on tasks\n\
             - Leave time management\n\
             - Task, project, and customer management\n\
             - User management\n\
             \n\
             For more details: https://www.actitime.com/api-documentation",
            config.base_url, config.company
        )
    }
}
