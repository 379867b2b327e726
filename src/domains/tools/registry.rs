//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The merged table of all tool groups, keyed by unique name
//! - Tool metadata for listing
//! - The single dispatch point that turns every failure into an error result

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{info, instrument, warn};

use super::definitions::{leavetime, projects, tasks, timetrack, users};
use super::error::{ToolError, ToolResult};
use super::handlers::ToolEntry;
use crate::domains::actitime::ActitimeClient;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns every tool entry and the client they call.
pub struct ToolRegistry {
    client: Arc<ActitimeClient>,
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create the registry with all tool groups.
    ///
    /// Fails if two groups declare the same tool name.
    pub fn new(client: Arc<ActitimeClient>) -> ToolResult<Self> {
        let groups = [
            timetrack::tools(),
            leavetime::tools(),
            tasks::tools(),
            projects::tools(),
            users::tools(),
        ];
        Self::from_entries(client, groups.into_iter().flatten())
    }

    /// Create a registry from an explicit list of entries.
    pub fn from_entries(
        client: Arc<ActitimeClient>,
        entries: impl IntoIterator<Item = ToolEntry>,
    ) -> ToolResult<Self> {
        let mut registry = Self {
            client,
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for entry in entries {
            registry.register(entry)?;
        }
        info!("Registered {} tools", registry.entries.len());
        Ok(registry)
    }

    fn register(&mut self, entry: ToolEntry) -> ToolResult<()> {
        let name = entry.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.iter().map(ToolEntry::name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool().clone()).collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Dispatch a tool call.
    ///
    /// Always returns a well-formed result: unknown tools, invalid arguments
    /// and API failures come back with `isError: true`.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        match self.try_call(name, arguments.unwrap_or_default()).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                let status = match &e {
                    ToolError::Api(api) => api.status(),
                    _ => None,
                };
                match status {
                    Some(status) => warn!("Tool '{}' failed with HTTP {}: {}", name, status, e),
                    None => warn!("Tool '{}' failed: {}", name, e),
                }
                CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }

    async fn try_call(&self, name: &str, arguments: JsonObject) -> ToolResult<String> {
        let entry = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        info!("Calling tool: {}", name);
        entry.invoke(self.client.clone(), arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::actitime::testing::RecordingBackend;
    use crate::domains::actitime::ApiError;
    use rmcp::model::RawContent;
    use serde_json::json;
    use std::collections::HashSet;

    fn registry_with(backend: Arc<RecordingBackend>) -> ToolRegistry {
        ToolRegistry::new(Arc::new(ActitimeClient::with_backend(backend))).unwrap()
    }

    fn args(value: serde_json::Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_registry_tool_names_are_unique() {
        let registry = registry_with(Arc::new(RecordingBackend::echo()));
        let names = registry.tool_names();
        let unique: HashSet<_> = names.iter().collect();

        assert_eq!(names.len(), 22);
        assert_eq!(unique.len(), names.len());
        for name in [
            "get_timetrack",
            "get_timetrack_record",
            "set_timetrack",
            "adjust_timetrack",
            "lock_timetrack",
            "unlock_timetrack",
            "get_leavetime",
            "set_leavetime",
            "adjust_leavetime",
            "get_leave_types",
            "get_leave_type",
            "get_tasks",
            "get_task",
            "create_task",
            "update_task",
            "get_projects",
            "get_project",
            "get_customers",
            "get_customer",
            "get_users",
            "get_user",
            "get_current_user",
        ] {
            assert!(names.contains(&name), "missing tool {}", name);
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let client = Arc::new(ActitimeClient::with_backend(Arc::new(RecordingBackend::echo())));
        let entries = tasks::tools().into_iter().chain(tasks::tools());

        let err = ToolRegistry::from_entries(client, entries).err().unwrap();

        assert!(matches!(err, ToolError::DuplicateTool(name) if name == "get_tasks"));
    }

    #[test]
    fn test_list_tools_has_object_schemas() {
        let registry = registry_with(Arc::new(RecordingBackend::echo()));
        for tool in registry.list_tools() {
            assert!(tool.description.is_some());
            assert_eq!(tool.input_schema.get("type"), Some(&json!("object")), "{}", tool.name);
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let backend = Arc::new(RecordingBackend::echo());
        let registry = registry_with(backend.clone());

        let result = registry.call_tool("delete_everything", None).await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("delete_everything"));
        assert_eq!(backend.call_count(), 0);

        // The registry keeps serving afterwards.
        let next = registry.call_tool("get_current_user", None).await;
        assert_eq!(next.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_validation_errors_never_reach_client() {
        let backend = Arc::new(RecordingBackend::echo());
        let registry = registry_with(backend.clone());

        let leave = registry
            .call_tool(
                "set_leavetime",
                args(json!({ "userId": 1, "date": "2024-01-01", "leaveTypeId": 2, "leaveTime": -5 })),
            )
            .await;
        let status = registry
            .call_tool("get_tasks", args(json!({ "status": "blocked" })))
            .await;

        assert_eq!(leave.is_error, Some(true));
        assert_eq!(status.is_error, Some(true));
        assert!(text_of(&leave).starts_with("Error: Invalid arguments"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_set_timetrack_round_trip() {
        let backend = Arc::new(RecordingBackend::echo());
        let registry = registry_with(backend.clone());

        let result = registry
            .call_tool(
                "set_timetrack",
                args(json!({ "userId": 7, "date": "2024-02-01", "taskId": 3, "time": 120 })),
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        let text = text_of(&result);
        assert!(text.contains("120"));
        assert!(text.contains("task 3"));
    }

    #[tokio::test]
    async fn test_adjust_timetrack_issues_single_patch() {
        let backend = Arc::new(RecordingBackend::echo());
        let registry = registry_with(backend.clone());

        let result = registry
            .call_tool(
                "adjust_timetrack",
                args(json!({ "userId": 7, "date": "2024-02-01", "taskId": 3, "delta": -30 })),
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, reqwest::Method::PATCH);
        assert_eq!(requests[0].path, "/timetrack/7/2024-02-01/3/time");
        assert_eq!(requests[0].body, Some(json!({ "delta": -30 })));
    }

    #[tokio::test]
    async fn test_get_leavetime_end_to_end() {
        let response = json!({ "dateFrom": "2024-01-01", "dateTo": "2024-01-01", "data": [] });
        let backend = Arc::new(RecordingBackend::fixed(response.clone()));
        let registry = registry_with(backend);

        let result = registry
            .call_tool("get_leavetime", args(json!({ "dateFrom": "2024-01-01" })))
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
        assert_eq!(text_of(&result), serde_json::to_string_pretty(&response).unwrap());
    }

    #[tokio::test]
    async fn test_remote_error_surfaces_server_payload() {
        let backend = Arc::new(RecordingBackend::echo());
        backend.push_response(Err(ApiError::Remote {
            status: 403,
            body: r#"{"key":"api.error.forbidden","message":"No permission"}"#.to_string(),
        }));
        let registry = registry_with(backend.clone());

        let result = registry.call_tool("get_project", args(json!({ "id": 5 }))).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            r#"Error: {"key":"api.error.forbidden","message":"No permission"}"#
        );
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_arguments_for_required_fields() {
        let backend = Arc::new(RecordingBackend::echo());
        let registry = registry_with(backend.clone());

        let result = registry.call_tool("get_task", None).await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("id"));
        assert_eq!(backend.call_count(), 0);
    }
}
