//! Project and customer tools.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::common::{pretty_json, typed};
use crate::domains::actitime::ActitimeClient;
use crate::domains::actitime::types::{Customer, CustomerQuery, Project, ProjectQuery};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::handlers::{ActitimeTool, ToolEntry, Validate, ensure_at_most};

/// All tools of this group, in listing order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetProjectsTool>(),
        ToolEntry::of::<GetProjectTool>(),
        ToolEntry::of::<GetCustomersTool>(),
        ToolEntry::of::<GetCustomerTool>(),
    ]
}

impl Validate for ProjectQuery {
    fn validate(&self) -> ToolResult<()> {
        ensure_at_most("limit", self.limit, 1000)
    }
}

impl Validate for CustomerQuery {
    fn validate(&self) -> ToolResult<()> {
        ensure_at_most("limit", self.limit, 1000)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProjectIdParams {
    #[schemars(description = "Project ID")]
    pub id: u64,
}

impl Validate for ProjectIdParams {}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CustomerIdParams {
    #[schemars(description = "Customer ID")]
    pub id: u64,
}

impl Validate for CustomerIdParams {}

pub struct GetProjectsTool;

impl ActitimeTool for GetProjectsTool {
    const NAME: &'static str = "get_projects";
    const DESCRIPTION: &'static str = "Get projects with optional filtering";
    type Params = ProjectQuery;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let data = client.get_projects(&params).await?;
        pretty_json(&data)
    }
}

pub struct GetProjectTool;

impl ActitimeTool for GetProjectTool {
    const NAME: &'static str = "get_project";
    const DESCRIPTION: &'static str = "Get details of a specific project";
    type Params = ProjectIdParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let project = client.get_project(params.id).await?;
        if let Some(found) = typed::<Project>(&project) {
            debug!("Project {} '{}' of customer {}", found.id, found.name, found.customer_id);
        }
        pretty_json(&project)
    }
}

pub struct GetCustomersTool;

impl ActitimeTool for GetCustomersTool {
    const NAME: &'static str = "get_customers";
    const DESCRIPTION: &'static str = "Get customers with optional filtering";
    type Params = CustomerQuery;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let data = client.get_customers(&params).await?;
        pretty_json(&data)
    }
}

pub struct GetCustomerTool;

impl ActitimeTool for GetCustomerTool {
    const NAME: &'static str = "get_customer";
    const DESCRIPTION: &'static str = "Get details of a specific customer";
    type Params = CustomerIdParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let customer = client.get_customer(params.id).await?;
        if let Some(found) = typed::<Customer>(&customer) {
            debug!("Customer {} '{}' (archived: {})", found.id, found.name, found.archived);
        }
        pretty_json(&customer)
    }
}
