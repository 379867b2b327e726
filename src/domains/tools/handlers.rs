//! Tool handler plumbing.
//!
//! Every tool is a unit struct implementing [`ActitimeTool`]. The registry
//! turns each one into a [`ToolEntry`]: the MCP tool metadata (with a JSON
//! schema generated from the parameter type) plus a type-erased handler
//! that validates raw arguments and runs the tool.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::{ToolError, ToolResult};
use crate::domains::actitime::ActitimeClient;

/// Bounds checks that a JSON schema alone does not enforce during
/// deserialization.
pub trait Validate {
    /// Check the parsed arguments. The default accepts everything.
    fn validate(&self) -> ToolResult<()> {
        Ok(())
    }
}

/// A tool backed by one actiTIME API call.
pub trait ActitimeTool: 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments. Deserialization plus [`Validate`] is the input contract.
    type Params: DeserializeOwned + JsonSchema + Validate + Send + 'static;

    /// Call the API and format the result as text.
    fn execute(
        client: &ActitimeClient,
        params: Self::Params,
    ) -> impl Future<Output = ToolResult<String>> + Send;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Parse and validate raw arguments into a tool's parameter type.
pub fn parse_params<P>(arguments: JsonObject) -> ToolResult<P>
where
    P: DeserializeOwned + Validate,
{
    let params: P = serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
    params.validate()?;
    Ok(params)
}

type HandlerFn = dyn Fn(Arc<ActitimeClient>, JsonObject) -> BoxFuture<'static, ToolResult<String>>
    + Send
    + Sync;

/// A registered tool: metadata plus its type-erased handler.
#[derive(Clone)]
pub struct ToolEntry {
    tool: Tool,
    handler: Arc<HandlerFn>,
}

impl ToolEntry {
    /// Build the entry for a tool type.
    pub fn of<T: ActitimeTool>() -> Self {
        let handler: Arc<HandlerFn> = Arc::new(|client: Arc<ActitimeClient>, arguments: JsonObject| {
            async move {
                let params = parse_params::<T::Params>(arguments)?;
                T::execute(&client, params).await
            }
            .boxed()
        });

        Self {
            tool: T::to_tool(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Validate the arguments and run the handler.
    pub async fn invoke(&self, client: Arc<ActitimeClient>, arguments: JsonObject) -> ToolResult<String> {
        (self.handler)(client, arguments).await
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry").field("name", &self.tool.name).finish()
    }
}

// ============================================================================
// Bounds helpers
// ============================================================================

/// Reject negative minute values.
pub fn ensure_non_negative(field: &str, value: i64) -> ToolResult<()> {
    if value < 0 {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must be greater than or equal to 0, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Reject values above `max`.
pub fn ensure_at_most(field: &str, value: Option<u32>, max: u32) -> ToolResult<()> {
    match value {
        Some(v) if v > max => Err(ToolError::invalid_arguments(format!(
            "'{}' must be less than or equal to {}, got {}",
            field, max, v
        ))),
        _ => Ok(()),
    }
}

/// Reject values outside `min..=max`.
pub fn ensure_within(field: &str, value: Option<u32>, min: u32, max: u32) -> ToolResult<()> {
    match value {
        Some(v) if v < min || v > max => Err(ToolError::invalid_arguments(format!(
            "'{}' must be between {} and {}, got {}",
            field, min, max, v
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Minutes {
        minutes: i64,
    }

    impl Validate for Minutes {
        fn validate(&self) -> ToolResult<()> {
            ensure_non_negative("minutes", self.minutes)
        }
    }

    fn object(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_params_ok() {
        let params: Minutes = parse_params(object(json!({ "minutes": 30 }))).unwrap();
        assert_eq!(params.minutes, 30);
    }

    #[test]
    fn test_parse_params_type_mismatch() {
        let err = parse_params::<Minutes>(object(json!({ "minutes": "thirty" }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_parse_params_missing_field() {
        let err = parse_params::<Minutes>(JsonObject::new()).unwrap_err();
        assert!(err.to_string().contains("minutes"));
    }

    #[test]
    fn test_parse_params_runs_validation() {
        let err = parse_params::<Minutes>(object(json!({ "minutes": -5 }))).unwrap_err();
        assert!(err.to_string().contains("greater than or equal to 0"));
    }

    #[test]
    fn test_bounds_helpers() {
        assert!(ensure_at_most("limit", Some(1000), 1000).is_ok());
        assert!(ensure_at_most("limit", Some(1001), 1000).is_err());
        assert!(ensure_at_most("limit", None, 1000).is_ok());
        assert!(ensure_within("stopAfter", Some(0), 1, 1000).is_err());
        assert!(ensure_within("stopAfter", Some(1), 1, 1000).is_ok());
    }
}
