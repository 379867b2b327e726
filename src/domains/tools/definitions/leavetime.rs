//! Leave time tools.
//!
//! Leave time records absence minutes per user, date and leave type.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::common::{confirmation, pretty_json, typed};
use crate::domains::actitime::ActitimeClient;
use crate::domains::actitime::types::{
    LeaveTimeQuery, LeaveTimeRecord, LeaveType, LeaveTypeQuery, UserRef,
};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::handlers::{
    ActitimeTool, ToolEntry, Validate, ensure_at_most, ensure_non_negative, ensure_within,
};

/// All tools of this group, in listing order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetLeavetimeTool>(),
        ToolEntry::of::<SetLeavetimeTool>(),
        ToolEntry::of::<AdjustLeavetimeTool>(),
        ToolEntry::of::<GetLeaveTypesTool>(),
        ToolEntry::of::<GetLeaveTypeTool>(),
    ]
}

impl Validate for LeaveTimeQuery {
    fn validate(&self) -> ToolResult<()> {
        ensure_within("stopAfter", self.stop_after, 1, 1000)
    }
}

impl Validate for LeaveTypeQuery {
    fn validate(&self) -> ToolResult<()> {
        ensure_at_most("limit", self.limit, 1000)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetLeavetimeParams {
    #[schemars(description = "User ID or username")]
    pub user_id: UserRef,

    #[schemars(description = "Date (YYYY-MM-DD or \"today\")")]
    pub date: String,

    #[schemars(description = "Leave type ID")]
    pub leave_type_id: u64,

    #[schemars(description = "Leave time in minutes", range(min = 0))]
    pub leave_time: i64,
}

impl Validate for SetLeavetimeParams {
    fn validate(&self) -> ToolResult<()> {
        ensure_non_negative("leaveTime", self.leave_time)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustLeavetimeParams {
    #[schemars(description = "User ID or username")]
    pub user_id: UserRef,

    #[schemars(description = "Date (YYYY-MM-DD or \"today\")")]
    pub date: String,

    #[schemars(description = "Leave type ID")]
    pub leave_type_id: u64,

    #[schemars(description = "Minutes to add (positive) or subtract (negative)")]
    pub delta: i64,
}

impl Validate for AdjustLeavetimeParams {}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LeaveTypeIdParams {
    #[schemars(description = "Leave type ID")]
    pub id: u64,
}

impl Validate for LeaveTypeIdParams {}

pub struct GetLeavetimeTool;

impl ActitimeTool for GetLeavetimeTool {
    const NAME: &'static str = "get_leavetime";
    const DESCRIPTION: &'static str =
        "Retrieve leave time records for specified users and date range";
    type Params = LeaveTimeQuery;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let data = client.get_leave_time(&params).await?;
        pretty_json(&data)
    }
}

pub struct SetLeavetimeTool;

impl ActitimeTool for SetLeavetimeTool {
    const NAME: &'static str = "set_leavetime";
    const DESCRIPTION: &'static str = "Set leave time for a specific user, date, and leave type";
    type Params = SetLeavetimeParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let result = client
            .set_leave_time(&params.user_id, &params.date, params.leave_type_id, params.leave_time)
            .await?;
        if let Some(record) = typed::<LeaveTimeRecord>(&result) {
            debug!(
                "Leave type {} for user {} on {}: {} minutes",
                record.leave_type_id, record.user_id, record.date, record.leave_time
            );
        }
        confirmation(format!("Leave time set: {} minutes", params.leave_time), &result)
    }
}

pub struct AdjustLeavetimeTool;

impl ActitimeTool for AdjustLeavetimeTool {
    const NAME: &'static str = "adjust_leavetime";
    const DESCRIPTION: &'static str = "Adjust leave time by adding or subtracting minutes";
    type Params = AdjustLeavetimeParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let result = client
            .adjust_leave_time(&params.user_id, &params.date, params.leave_type_id, params.delta)
            .await?;
        confirmation(format!("Leave time adjusted by {} minutes", params.delta), &result)
    }
}

pub struct GetLeaveTypesTool;

impl ActitimeTool for GetLeaveTypesTool {
    const NAME: &'static str = "get_leave_types";
    const DESCRIPTION: &'static str = "Get available leave types";
    type Params = LeaveTypeQuery;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let data = client.get_leave_types(&params).await?;
        pretty_json(&data)
    }
}

pub struct GetLeaveTypeTool;

impl ActitimeTool for GetLeaveTypeTool {
    const NAME: &'static str = "get_leave_type";
    const DESCRIPTION: &'static str = "Get details of a specific leave type";
    type Params = LeaveTypeIdParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let leave_type = client.get_leave_type(params.id).await?;
        if let Some(found) = typed::<LeaveType>(&leave_type) {
            debug!("Leave type {} '{}' ({:?})", found.id, found.name, found.balance);
        }
        pretty_json(&leave_type)
    }
}
