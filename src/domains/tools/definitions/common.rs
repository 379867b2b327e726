//! Formatting helpers shared by all tool groups.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domains::tools::error::{ToolError, ToolResult};

/// Pretty-print an API response (two-space indent, server key order).
pub fn pretty_json(value: &Value) -> ToolResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ToolError::internal(e.to_string()))
}

/// Typed view of an API response, used for log lines.
///
/// Returns `None` when the payload does not have the expected shape; the raw
/// JSON is what the tool returns either way.
pub fn typed<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

/// Prefix a pretty-printed API response with a confirmation line.
pub fn confirmation(line: impl Display, value: &Value) -> ToolResult<String> {
    Ok(format!("{}\n{}", line, pretty_json(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::actitime::types::{Task, TaskStatus, TimeTrackListResponse, User};
    use serde_json::json;

    #[test]
    fn test_pretty_json_keeps_key_order() {
        let value = json!({ "dateTo": "2024-01-02", "dateFrom": "2024-01-01" });
        assert_eq!(
            pretty_json(&value).unwrap(),
            "{\n  \"dateTo\": \"2024-01-02\",\n  \"dateFrom\": \"2024-01-01\"\n}"
        );
    }

    #[test]
    fn test_typed_view_of_task_response() {
        let value = json!({
            "id": 12,
            "name": "Design review",
            "status": "open",
            "projectId": 3,
            "customerId": 1,
            "url": "https://online.actitime.com/acme/tasks/12"
        });

        let task: Task = typed(&value).unwrap();
        assert_eq!(task.id, 12);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.customer_id, Some(1));
        assert_eq!(task.deadline, None);

        assert!(typed::<Task>(&json!({ "id": 12 })).is_none());
        assert!(typed::<User>(&Value::Null).is_none());
    }

    #[test]
    fn test_typed_view_of_timetrack_list() {
        let value = json!({
            "dateFrom": "2024-01-01",
            "dateTo": "2024-01-07",
            "nextDateFrom": "2024-01-08",
            "data": [{
                "userId": 7,
                "date": "2024-01-01",
                "dayOffset": 0,
                "approved": false,
                "records": [{ "taskId": 3, "time": 90, "comment": "standup" }]
            }]
        });

        let list: TimeTrackListResponse = typed(&value).unwrap();
        assert_eq!(list.next_date_from.as_deref(), Some("2024-01-08"));
        assert_eq!(list.data[0].records[0].time, 90);
        assert!(list.tasks.is_none());
    }

    #[test]
    fn test_confirmation_prefix() {
        let text = confirmation("Timetrack locked", &json!(null)).unwrap();
        assert_eq!(text, "Timetrack locked\nnull");
    }
}
