//! Task tools.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{confirmation, pretty_json, typed};
use crate::domains::actitime::ActitimeClient;
use crate::domains::actitime::types::{NewTask, Task, TaskQuery, TaskStatus, TaskUpdate};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::handlers::{ActitimeTool, ToolEntry, Validate, ensure_at_most};

/// All tools of this group, in listing order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetTasksTool>(),
        ToolEntry::of::<GetTaskTool>(),
        ToolEntry::of::<CreateTaskTool>(),
        ToolEntry::of::<UpdateTaskTool>(),
    ]
}

impl Validate for TaskQuery {
    fn validate(&self) -> ToolResult<()> {
        ensure_at_most("limit", self.limit, 1000)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    #[schemars(description = "Task ID")]
    pub id: u64,
}

impl Validate for TaskIdParams {}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskParams {
    #[schemars(description = "Task name")]
    pub name: String,

    #[schemars(description = "Project ID")]
    pub project_id: u64,

    #[schemars(description = "Task description")]
    #[serde(default)]
    pub description: Option<String>,

    #[schemars(description = "Initial status")]
    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[schemars(description = "Deadline (YYYY-MM-DD)")]
    #[serde(default)]
    pub deadline: Option<String>,

    #[schemars(description = "Estimated time in minutes")]
    #[serde(default)]
    pub estimated_time: Option<u64>,
}

impl Validate for CreateTaskParams {}

impl From<CreateTaskParams> for NewTask {
    fn from(params: CreateTaskParams) -> Self {
        Self {
            name: params.name,
            project_id: params.project_id,
            description: params.description,
            status: params.status,
            deadline: params.deadline,
            estimated_time: params.estimated_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskParams {
    #[schemars(description = "Task ID")]
    pub id: u64,

    #[schemars(description = "New task name")]
    #[serde(default)]
    pub name: Option<String>,

    #[schemars(description = "New description")]
    #[serde(default)]
    pub description: Option<String>,

    #[schemars(description = "New status")]
    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[schemars(description = "New deadline (YYYY-MM-DD)")]
    #[serde(default)]
    pub deadline: Option<String>,

    #[schemars(description = "New estimated time in minutes")]
    #[serde(default)]
    pub estimated_time: Option<u64>,
}

impl Validate for UpdateTaskParams {}

impl UpdateTaskParams {
    /// Split into the task ID and the PATCH body.
    fn into_parts(self) -> (u64, TaskUpdate) {
        let update = TaskUpdate {
            name: self.name,
            description: self.description,
            status: self.status,
            deadline: self.deadline,
            estimated_time: self.estimated_time,
        };
        (self.id, update)
    }
}

pub struct GetTasksTool;

impl ActitimeTool for GetTasksTool {
    const NAME: &'static str = "get_tasks";
    const DESCRIPTION: &'static str = "Get tasks with optional filtering";
    type Params = TaskQuery;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let data = client.get_tasks(&params).await?;
        pretty_json(&data)
    }
}

pub struct GetTaskTool;

impl ActitimeTool for GetTaskTool {
    const NAME: &'static str = "get_task";
    const DESCRIPTION: &'static str = "Get details of a specific task";
    type Params = TaskIdParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let task = client.get_task(params.id).await?;
        pretty_json(&task)
    }
}

pub struct CreateTaskTool;

impl ActitimeTool for CreateTaskTool {
    const NAME: &'static str = "create_task";
    const DESCRIPTION: &'static str = "Create a new task";
    type Params = CreateTaskParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        info!("Creating task '{}' in project {}", params.name, params.project_id);
        let task = client.create_task(&params.into()).await?;
        if let Some(created) = typed::<Task>(&task) {
            info!("Created task {} '{}'", created.id, created.name);
        }
        confirmation("Task created successfully!", &task)
    }
}

pub struct UpdateTaskTool;

impl ActitimeTool for UpdateTaskTool {
    const NAME: &'static str = "update_task";
    const DESCRIPTION: &'static str = "Update an existing task";
    type Params = UpdateTaskParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let (id, update) = params.into_parts();
        let task = client.update_task(id, &update).await?;
        if let Some(updated) = typed::<Task>(&task) {
            info!("Updated task {} '{}' ({:?})", updated.id, updated.name, updated.status);
        }
        confirmation("Task updated successfully!", &task)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domains::actitime::testing::RecordingBackend;
    use reqwest::Method;
    use rmcp::model::JsonObject;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_get_tasks_is_idempotent_for_same_filters() {
        let backend = Arc::new(RecordingBackend::fixed(json!({
            "offset": 0, "limit": 2,
            "items": [{ "id": 1, "name": "Design", "status": "open", "projectId": 4 }]
        })));
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));
        let entry = ToolEntry::of::<GetTasksTool>();
        let filters = json!({ "projectIds": "4", "status": "open", "limit": 2 });

        let first = entry.invoke(client.clone(), args(filters.clone())).await.unwrap();
        let second = entry.invoke(client, args(filters)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_get_tasks_rejects_unknown_status() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        let err = ToolEntry::of::<GetTasksTool>()
            .invoke(client, args(json!({ "status": "archived" })))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("archived"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_tasks_rejects_limit_over_1000() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        let err = ToolEntry::of::<GetTasksTool>()
            .invoke(client, args(json!({ "limit": 1001 })))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("limit"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_task_posts_body() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        let text = ToolEntry::of::<CreateTaskTool>()
            .invoke(
                client,
                args(json!({ "name": "Write report", "projectId": 8, "estimatedTime": 240 })),
            )
            .await
            .unwrap();

        assert!(text.starts_with("Task created successfully!\n"));
        let request = backend.last_request().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/tasks");
        assert_eq!(
            request.body,
            Some(json!({ "name": "Write report", "projectId": 8, "estimatedTime": 240 }))
        );
    }

    #[tokio::test]
    async fn test_update_task_strips_id_from_body() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        let text = ToolEntry::of::<UpdateTaskTool>()
            .invoke(client, args(json!({ "id": 15, "status": "completed" })))
            .await
            .unwrap();

        assert!(text.starts_with("Task updated successfully!\n"));
        let request = backend.last_request().unwrap();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "/tasks/15");
        assert_eq!(request.body, Some(json!({ "status": "completed" })));
    }

    #[tokio::test]
    async fn test_get_task_requires_numeric_id() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        let result = ToolEntry::of::<GetTaskTool>()
            .invoke(client, args(json!({ "id": "fifteen" })))
            .await;

        assert!(result.is_err());
        assert_eq!(backend.call_count(), 0);
    }
}
