//! Current connection resource definition.

use super::ResourceDefinition;
use crate::core::config::ActitimeConfig;

/// Connection settings of this server instance. Never exposes the password.
pub struct ConnectionResource;

impl ResourceDefinition for ConnectionResource {
    const NAME: &'static str = "Current Configuration";
    const DESCRIPTION: &'static str = "Current actiTIME connection info";

    fn uri(config: &ActitimeConfig) -> String {
        format!("actitime://config/{}", config.company)
    }

    fn render(config: &ActitimeConfig) -> String {
        let connected = if config.has_credentials() { "Yes" } else { "No" };
        format!(
            "actiTIME Configuration\n\
             \n\
             Company: {}\n\
             Base URL: {}\n\
             Username: {}\n\
             Connected: {}",
            config.company, config.base_url, config.username, connected
        )
    }
}
