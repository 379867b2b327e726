//! actiTIME API data shapes.
//!
//! Query and body types are serialized with camelCase names to match the
//! REST API. Query types double as tool parameters, so they also carry
//! schema descriptions. Record types mirror the resources returned by the
//! server; responses are forwarded as raw JSON, so these are descriptive
//! rather than enforced.

use std::collections::HashMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers and enums
// ============================================================================

/// A user addressed either by numeric ID or by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum UserRef {
    Id(u64),
    Username(String),
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Username(name) => f.write_str(name),
        }
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Completed,
}

/// Balance a leave type is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LeaveBalance {
    #[serde(rename = "None")]
    NoBalance,
    Sick,
    #[serde(rename = "PTO")]
    Pto,
}

// ============================================================================
// Query parameters
// ============================================================================

/// Filters for `GET /timetrack`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackQuery {
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub date_from: String,

    #[schemars(description = "End date (YYYY-MM-DD)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    #[schemars(description = "Comma-separated user IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<String>,

    #[schemars(description = "Comma-separated task IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<String>,

    #[schemars(description = "Comma-separated project IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<String>,

    #[schemars(description = "Comma-separated customer IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_ids: Option<String>,

    #[schemars(description = "Filter by approval status")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,

    #[schemars(description = "Max records to return (1-1000)", range(min = 1, max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_after: Option<u32>,
}

/// Filters for `GET /leavetime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTimeQuery {
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub date_from: String,

    #[schemars(description = "End date (YYYY-MM-DD)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    #[schemars(description = "Comma-separated user IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<String>,

    #[schemars(description = "Comma-separated leave type IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type_ids: Option<String>,

    #[schemars(description = "Max records to return (1-1000)", range(min = 1, max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_after: Option<u32>,
}

/// Filters for `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    #[schemars(description = "Comma-separated task IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,

    #[schemars(description = "Comma-separated project IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<String>,

    #[schemars(description = "Comma-separated customer IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_ids: Option<String>,

    #[schemars(description = "Filter by status")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[schemars(description = "Filter by exact name")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[schemars(description = "Max results (1-1000)", range(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[schemars(description = "Pagination offset")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Filters for `GET /projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    #[schemars(description = "Comma-separated customer IDs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_ids: Option<String>,

    #[schemars(description = "Filter by archived status")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[schemars(description = "Filter by exact name")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[schemars(description = "Max results", range(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[schemars(description = "Pagination offset")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Filters for `GET /customers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    #[schemars(description = "Filter by archived status")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[schemars(description = "Filter by exact name")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[schemars(description = "Max results", range(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[schemars(description = "Pagination offset")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Filters for `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[schemars(description = "Filter by active status")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[schemars(description = "Filter by exact username")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[schemars(description = "Filter by exact email")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[schemars(description = "Max results", range(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[schemars(description = "Pagination offset")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Filters for `GET /leaveTypes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTypeQuery {
    #[schemars(description = "Filter by archived status")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[schemars(description = "Filter by balance type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<LeaveBalance>,

    #[schemars(description = "Max results", range(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[schemars(description = "Pagination offset")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body of `PATCH /timetrack/{userId}/{date}/{taskId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackUpdate {
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of the `.../time` adjustment endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeDelta {
    pub delta: i64,
}

/// Body of `PATCH /leavetime/{userId}/{date}/{leaveTypeId}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTimeUpdate {
    pub leave_time: i64,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub project_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u64>,
}

/// Body of `PATCH /tasks/{id}`. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u64>,
}

/// Body of `POST /timetrack/lock` and `POST /timetrack/unlock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LockRange {
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub date_from: String,

    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub date_to: String,

    #[schemars(description = "User IDs to lock or unlock (all users when omitted)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<u64>>,
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackRecord {
    pub task_id: u64,
    /// Minutes.
    pub time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTimeRecord {
    pub user_id: u64,
    pub date: String,
    pub leave_type_id: u64,
    /// Minutes.
    pub leave_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub project_id: u64,
    #[serde(default)]
    pub customer_id: Option<u64>,
    #[serde(default)]
    pub workflow_status_id: Option<u64>,
    #[serde(default)]
    pub type_of_work_id: Option<u64>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub estimated_time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub customer_id: u64,
    pub archived: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub archived: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
    #[serde(default)]
    pub department_id: Option<u64>,
    #[serde(default)]
    pub hired: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveType {
    pub id: u64,
    pub name: String,
    pub balance: LeaveBalance,
    pub archived: bool,
}

/// One user's tracked time for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDayTimeTrack {
    pub user_id: u64,
    pub date: String,
    pub day_offset: i64,
    pub records: Vec<TimeTrackRecord>,
    pub approved: bool,
}

/// Response of `GET /timetrack`.
///
/// The optional maps are keyed by entity ID and only present when the
/// request asked for them to be included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackListResponse {
    pub date_from: String,
    pub date_to: String,
    #[serde(default)]
    pub next_date_from: Option<String>,
    pub data: Vec<UserDayTimeTrack>,
    #[serde(default)]
    pub tasks: Option<HashMap<String, Task>>,
    #[serde(default)]
    pub projects: Option<HashMap<String, Project>>,
    #[serde(default)]
    pub customers: Option<HashMap<String, Customer>>,
    #[serde(default)]
    pub users: Option<HashMap<String, User>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_ref_accepts_id_or_username() {
        let id: UserRef = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(id, UserRef::Id(42));
        assert_eq!(id.to_string(), "42");

        let name: UserRef = serde_json::from_value(json!("jdoe")).unwrap();
        assert_eq!(name, UserRef::Username("jdoe".to_string()));
        assert_eq!(name.to_string(), "jdoe");

        assert!(serde_json::from_value::<UserRef>(json!(true)).is_err());
    }

    #[test]
    fn test_leave_balance_wire_names() {
        assert_eq!(json!(LeaveBalance::NoBalance), json!("None"));
        assert_eq!(json!(LeaveBalance::Pto), json!("PTO"));
        let sick: LeaveBalance = serde_json::from_value(json!("Sick")).unwrap();
        assert_eq!(sick, LeaveBalance::Sick);
        assert!(serde_json::from_value::<LeaveBalance>(json!("Vacation")).is_err());
    }

    #[test]
    fn test_query_serializes_camel_case_and_skips_unset() {
        let query = TimeTrackQuery {
            date_from: "2024-01-01".to_string(),
            user_ids: Some("1,2".to_string()),
            stop_after: Some(50),
            ..Default::default()
        };
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "dateFrom=2024-01-01&userIds=1%2C2&stopAfter=50");
    }

    #[test]
    fn test_task_update_omits_unset_fields() {
        let update = TaskUpdate {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert_eq!(json!(update), json!({ "status": "completed" }));
    }

    #[test]
    fn test_time_track_list_response_shape() {
        let payload = json!({
            "dateFrom": "2024-01-01",
            "dateTo": "2024-01-02",
            "data": [{
                "userId": 7,
                "date": "2024-01-01",
                "dayOffset": 0,
                "records": [{ "taskId": 3, "time": 90, "comment": "review" }],
                "approved": false
            }],
            "tasks": {
                "3": { "id": 3, "name": "Review", "status": "open", "projectId": 1 }
            }
        });
        let response: TimeTrackListResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.data[0].records[0].time, 90);
        assert_eq!(response.tasks.unwrap()["3"].status, TaskStatus::Open);
        assert!(response.next_date_from.is_none());
    }

    #[test]
    fn test_user_and_leave_type_shapes() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "admin",
            "firstName": "Ada",
            "lastName": "Admin",
            "email": "admin@example.test",
            "active": true
        }))
        .unwrap();
        assert_eq!(user.username, "admin");

        let leave_type: LeaveType = serde_json::from_value(json!({
            "id": 2, "name": "Vacation", "balance": "PTO", "archived": false
        }))
        .unwrap();
        assert_eq!(leave_type.balance, LeaveBalance::Pto);

        let record: LeaveTimeRecord = serde_json::from_value(json!({
            "userId": 1, "date": "2024-03-01", "leaveTypeId": 2, "leaveTime": 480
        }))
        .unwrap();
        assert_eq!(record.leave_time, 480);
    }

    #[test]
    fn test_project_and_customer_shapes() {
        let project: Project = serde_json::from_value(json!({
            "id": 5, "name": "Website", "customerId": 2, "archived": false
        }))
        .unwrap();
        assert_eq!(project.customer_id, 2);

        let customer: Customer = serde_json::from_value(json!({
            "id": 2, "name": "ACME", "archived": true, "description": "Key account"
        }))
        .unwrap();
        assert!(customer.archived);
    }
}
