//! actiTIME REST API client.
//!
//! One method per endpoint. Every method issues exactly one request and
//! returns the response body verbatim.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::backend::{ApiRequest, HttpBackend, ReqwestBackend};
use super::error::ApiResult;
use super::types::{
    CustomerQuery, LeaveTimeQuery, LeaveTimeUpdate, LeaveTypeQuery, LockRange, NewTask,
    ProjectQuery, TaskQuery, TaskUpdate, TimeDelta, TimeTrackQuery, TimeTrackUpdate, UserQuery,
    UserRef,
};
use crate::core::config::ActitimeConfig;

/// Client for the actiTIME REST API.
#[derive(Clone)]
pub struct ActitimeClient {
    backend: Arc<dyn HttpBackend>,
}

impl ActitimeClient {
    /// Create a client talking to the configured actiTIME instance.
    pub fn new(config: &ActitimeConfig) -> ApiResult<Self> {
        Ok(Self::with_backend(Arc::new(ReqwestBackend::new(config)?)))
    }

    /// Create a client on top of an arbitrary backend.
    pub fn with_backend(backend: Arc<dyn HttpBackend>) -> Self {
        Self { backend }
    }

    async fn get<Q: Serialize + ?Sized>(&self, path: String, query: Option<&Q>) -> ApiResult<Value> {
        let mut request = ApiRequest::new(Method::GET, path);
        if let Some(query) = query {
            request = request.with_query(serde_urlencoded::to_string(query)?);
        }
        self.backend.execute(request).await
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, path: String, body: &B) -> ApiResult<Value> {
        let request = ApiRequest::new(method, path).with_body(serde_json::to_value(body)?);
        self.backend.execute(request).await
    }

    // ============ Time Track ============

    pub async fn get_time_track(&self, query: &TimeTrackQuery) -> ApiResult<Value> {
        self.get("/timetrack".to_string(), Some(query)).await
    }

    pub async fn get_time_track_record(&self, user: &UserRef, date: &str, task_id: u64) -> ApiResult<Value> {
        self.get::<()>(format!("/timetrack/{}/{}/{}", user, date, task_id), None)
            .await
    }

    pub async fn set_time_track(
        &self,
        user: &UserRef,
        date: &str,
        task_id: u64,
        update: &TimeTrackUpdate,
    ) -> ApiResult<Value> {
        self.send(Method::PATCH, format!("/timetrack/{}/{}/{}", user, date, task_id), update)
            .await
    }

    pub async fn adjust_time_track(&self, user: &UserRef, date: &str, task_id: u64, delta: i64) -> ApiResult<Value> {
        self.send(
            Method::PATCH,
            format!("/timetrack/{}/{}/{}/time", user, date, task_id),
            &TimeDelta { delta },
        )
        .await
    }

    pub async fn lock_time_track(&self, range: &LockRange) -> ApiResult<Value> {
        self.send(Method::POST, "/timetrack/lock".to_string(), range).await
    }

    pub async fn unlock_time_track(&self, range: &LockRange) -> ApiResult<Value> {
        self.send(Method::POST, "/timetrack/unlock".to_string(), range).await
    }

    // ============ Leave Time ============

    pub async fn get_leave_time(&self, query: &LeaveTimeQuery) -> ApiResult<Value> {
        self.get("/leavetime".to_string(), Some(query)).await
    }

    pub async fn set_leave_time(
        &self,
        user: &UserRef,
        date: &str,
        leave_type_id: u64,
        leave_time: i64,
    ) -> ApiResult<Value> {
        self.send(
            Method::PATCH,
            format!("/leavetime/{}/{}/{}", user, date, leave_type_id),
            &LeaveTimeUpdate { leave_time },
        )
        .await
    }

    pub async fn adjust_leave_time(
        &self,
        user: &UserRef,
        date: &str,
        leave_type_id: u64,
        delta: i64,
    ) -> ApiResult<Value> {
        self.send(
            Method::PATCH,
            format!("/leavetime/{}/{}/{}/time", user, date, leave_type_id),
            &TimeDelta { delta },
        )
        .await
    }

    // ============ Leave Types ============

    pub async fn get_leave_types(&self, query: &LeaveTypeQuery) -> ApiResult<Value> {
        self.get("/leaveTypes".to_string(), Some(query)).await
    }

    pub async fn get_leave_type(&self, id: u64) -> ApiResult<Value> {
        self.get::<()>(format!("/leaveTypes/{}", id), None).await
    }

    // ============ Tasks ============

    pub async fn get_tasks(&self, query: &TaskQuery) -> ApiResult<Value> {
        self.get("/tasks".to_string(), Some(query)).await
    }

    pub async fn get_task(&self, id: u64) -> ApiResult<Value> {
        self.get::<()>(format!("/tasks/{}", id), None).await
    }

    pub async fn create_task(&self, task: &NewTask) -> ApiResult<Value> {
        self.send(Method::POST, "/tasks".to_string(), task).await
    }

    pub async fn update_task(&self, id: u64, update: &TaskUpdate) -> ApiResult<Value> {
        self.send(Method::PATCH, format!("/tasks/{}", id), update).await
    }

    // ============ Projects and Customers ============

    pub async fn get_projects(&self, query: &ProjectQuery) -> ApiResult<Value> {
        self.get("/projects".to_string(), Some(query)).await
    }

    pub async fn get_project(&self, id: u64) -> ApiResult<Value> {
        self.get::<()>(format!("/projects/{}", id), None).await
    }

    pub async fn get_customers(&self, query: &CustomerQuery) -> ApiResult<Value> {
        self.get("/customers".to_string(), Some(query)).await
    }

    pub async fn get_customer(&self, id: u64) -> ApiResult<Value> {
        self.get::<()>(format!("/customers/{}", id), None).await
    }

    // ============ Users ============

    pub async fn get_users(&self, query: &UserQuery) -> ApiResult<Value> {
        self.get("/users".to_string(), Some(query)).await
    }

    pub async fn get_user(&self, uid: &UserRef) -> ApiResult<Value> {
        self.get::<()>(format!("/users/{}", uid), None).await
    }

    pub async fn get_current_user(&self) -> ApiResult<Value> {
        self.get::<()>("/users/me".to_string(), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::backend::testing::RecordingBackend;
    use super::super::error::ApiError;
    use super::super::types::TaskStatus;
    use super::*;
    use serde_json::json;

    fn client_with(backend: Arc<RecordingBackend>) -> ActitimeClient {
        ActitimeClient::with_backend(backend)
    }

    #[tokio::test]
    async fn test_adjust_time_track_patches_time_endpoint() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = client_with(backend.clone());

        client
            .adjust_time_track(&UserRef::Id(7), "2024-02-01", 3, -30)
            .await
            .unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(requests[0].path, "/timetrack/7/2024-02-01/3/time");
        assert_eq!(requests[0].body, Some(json!({ "delta": -30 })));
        assert_eq!(requests[0].query, None);
    }

    #[tokio::test]
    async fn test_set_time_track_body_omits_missing_comment() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = client_with(backend.clone());

        let update = TimeTrackUpdate { time: 120, comment: None };
        client
            .set_time_track(&UserRef::Username("jdoe".to_string()), "today", 11, &update)
            .await
            .unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.path, "/timetrack/jdoe/today/11");
        assert_eq!(request.body, Some(json!({ "time": 120 })));
    }

    #[tokio::test]
    async fn test_get_tasks_encodes_filters() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = client_with(backend.clone());

        let query = TaskQuery {
            project_ids: Some("4".to_string()),
            status: Some(TaskStatus::Open),
            limit: Some(20),
            ..Default::default()
        };
        client.get_tasks(&query).await.unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.target(), "/tasks?projectIds=4&status=open&limit=20");
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_empty_query_sends_no_query_string() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = client_with(backend.clone());

        client.get_projects(&ProjectQuery::default()).await.unwrap();

        assert_eq!(backend.last_request().unwrap().target(), "/projects");
    }

    #[tokio::test]
    async fn test_read_endpoints_paths() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = client_with(backend.clone());

        client.get_current_user().await.unwrap();
        client.get_user(&UserRef::Id(12)).await.unwrap();
        client.get_leave_type(3).await.unwrap();
        client.get_customer(9).await.unwrap();
        client.get_task(21).await.unwrap();
        client
            .get_time_track_record(&UserRef::Id(1), "2024-05-06", 2)
            .await
            .unwrap();

        let paths: Vec<_> = backend.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/users/me",
                "/users/12",
                "/leaveTypes/3",
                "/customers/9",
                "/tasks/21",
                "/timetrack/1/2024-05-06/2",
            ]
        );
    }

    #[tokio::test]
    async fn test_lock_and_unlock_post_range() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = client_with(backend.clone());

        let range = LockRange {
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-31".to_string(),
            user_ids: Some(vec![1, 2]),
        };
        client.lock_time_track(&range).await.unwrap();
        client.unlock_time_track(&range).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/timetrack/lock");
        assert_eq!(requests[1].path, "/timetrack/unlock");
        assert_eq!(
            requests[0].body,
            Some(json!({ "dateFrom": "2024-01-01", "dateTo": "2024-01-31", "userIds": [1, 2] }))
        );
    }

    #[tokio::test]
    async fn test_remote_error_is_passed_through() {
        let backend = Arc::new(RecordingBackend::echo());
        backend.push_response(Err(ApiError::Remote {
            status: 404,
            body: r#"{"message":"Task 99 not found"}"#.to_string(),
        }));
        let client = client_with(backend.clone());

        let err = client.get_task(99).await.unwrap_err();

        assert_eq!(err.to_string(), r#"{"message":"Task 99 not found"}"#);
        assert_eq!(backend.call_count(), 1);
    }
}
