//! User tools.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::common::{pretty_json, typed};
use crate::domains::actitime::ActitimeClient;
use crate::domains::actitime::types::{User, UserQuery, UserRef};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::handlers::{ActitimeTool, ToolEntry, Validate, ensure_at_most};

/// All tools of this group, in listing order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetUsersTool>(),
        ToolEntry::of::<GetUserTool>(),
        ToolEntry::of::<GetCurrentUserTool>(),
    ]
}

impl Validate for UserQuery {
    fn validate(&self) -> ToolResult<()> {
        ensure_at_most("limit", self.limit, 1000)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetUserParams {
    #[schemars(description = "User ID or username")]
    pub uid: UserRef,
}

impl Validate for GetUserParams {}

/// `get_current_user` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

impl Validate for NoParams {}

pub struct GetUsersTool;

impl ActitimeTool for GetUsersTool {
    const NAME: &'static str = "get_users";
    const DESCRIPTION: &'static str = "Get users with optional filtering";
    type Params = UserQuery;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let data = client.get_users(&params).await?;
        pretty_json(&data)
    }
}

pub struct GetUserTool;

impl ActitimeTool for GetUserTool {
    const NAME: &'static str = "get_user";
    const DESCRIPTION: &'static str = "Get details of a specific user";
    type Params = GetUserParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let user = client.get_user(&params.uid).await?;
        pretty_json(&user)
    }
}

pub struct GetCurrentUserTool;

impl ActitimeTool for GetCurrentUserTool {
    const NAME: &'static str = "get_current_user";
    const DESCRIPTION: &'static str = "Get details of the authenticated user";
    type Params = NoParams;

    async fn execute(client: &ActitimeClient, _params: Self::Params) -> ToolResult<String> {
        let user = client.get_current_user().await?;
        if let Some(me) = typed::<User>(&user) {
            debug!("Authenticated as {} (id {})", me.username, me.id);
        }
        pretty_json(&user)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domains::actitime::testing::RecordingBackend;
    use rmcp::model::JsonObject;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_get_user_by_username_or_id() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));
        let entry = ToolEntry::of::<GetUserTool>();

        entry.invoke(client.clone(), args(json!({ "uid": "jdoe" }))).await.unwrap();
        entry.invoke(client, args(json!({ "uid": 12 }))).await.unwrap();

        let paths: Vec<_> = backend.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/users/jdoe", "/users/12"]);
    }

    #[tokio::test]
    async fn test_get_user_rejects_boolean_uid() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        let result = ToolEntry::of::<GetUserTool>()
            .invoke(client, args(json!({ "uid": true })))
            .await;

        assert!(result.is_err());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_current_user_ignores_extra_arguments() {
        let backend = Arc::new(RecordingBackend::fixed(json!({ "id": 1, "username": "admin" })));
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        let text = ToolEntry::of::<GetCurrentUserTool>()
            .invoke(client, args(json!({ "verbose": true })))
            .await
            .unwrap();

        assert!(text.contains("\"username\": \"admin\""));
        assert_eq!(backend.last_request().unwrap().path, "/users/me");
    }

    #[tokio::test]
    async fn test_get_users_filters() {
        let backend = Arc::new(RecordingBackend::echo());
        let client = Arc::new(ActitimeClient::with_backend(backend.clone()));

        ToolEntry::of::<GetUsersTool>()
            .invoke(client, args(json!({ "active": true, "email": "a@b.test" })))
            .await
            .unwrap();

        assert_eq!(
            backend.last_request().unwrap().target(),
            "/users?active=true&email=a%40b.test"
        );
    }
}
