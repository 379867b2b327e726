//! Time tracking tools.
//!
//! Read, set and adjust the minutes a user tracked on a task for a day, and
//! lock or unlock time-track editing for a date range.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info};

use super::common::{confirmation, pretty_json, typed};
use crate::domains::actitime::ActitimeClient;
use crate::domains::actitime::types::{
    LockRange, TimeTrackListResponse, TimeTrackQuery, TimeTrackRecord, TimeTrackUpdate, UserRef,
};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::handlers::{ActitimeTool, ToolEntry, Validate, ensure_non_negative, ensure_within};

/// All tools of this group, in listing order.
pub fn tools() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<GetTimetrackTool>(),
        ToolEntry::of::<GetTimetrackRecordTool>(),
        ToolEntry::of::<SetTimetrackTool>(),
        ToolEntry::of::<AdjustTimetrackTool>(),
        ToolEntry::of::<LockTimetrackTool>(),
        ToolEntry::of::<UnlockTimetrackTool>(),
    ]
}

impl Validate for TimeTrackQuery {
    fn validate(&self) -> ToolResult<()> {
        ensure_within("stopAfter", self.stop_after, 1, 1000)
    }
}

impl Validate for LockRange {}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Identifies one time-track cell.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimetrackRecordParams {
    #[schemars(description = "User ID or username")]
    pub user_id: UserRef,

    #[schemars(description = "Date (YYYY-MM-DD or \"today\")")]
    pub date: String,

    #[schemars(description = "Task ID")]
    pub task_id: u64,
}

impl Validate for TimetrackRecordParams {}

/// Parameters for setting tracked time.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTimetrackParams {
    #[schemars(description = "User ID or username")]
    pub user_id: UserRef,

    #[schemars(description = "Date (YYYY-MM-DD or \"today\")")]
    pub date: String,

    #[schemars(description = "Task ID")]
    pub task_id: u64,

    #[schemars(description = "Time in minutes", range(min = 0))]
    pub time: i64,

    #[schemars(description = "Optional comment")]
    #[serde(default)]
    pub comment: Option<String>,
}

impl Validate for SetTimetrackParams {
    fn validate(&self) -> ToolResult<()> {
        ensure_non_negative("time", self.time)
    }
}

/// Parameters for adjusting tracked time.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustTimetrackParams {
    #[schemars(description = "User ID or username")]
    pub user_id: UserRef,

    #[schemars(description = "Date (YYYY-MM-DD or \"today\")")]
    pub date: String,

    #[schemars(description = "Task ID")]
    pub task_id: u64,

    #[schemars(description = "Minutes to add (positive) or subtract (negative)")]
    pub delta: i64,
}

impl Validate for AdjustTimetrackParams {}

// ============================================================================
// Tool Definitions
// ============================================================================

pub struct GetTimetrackTool;

impl ActitimeTool for GetTimetrackTool {
    const NAME: &'static str = "get_timetrack";
    const DESCRIPTION: &'static str =
        "Retrieve time tracking records for specified users, tasks, and date range";
    type Params = TimeTrackQuery;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let data = client.get_time_track(&params).await?;
        if let Some(list) = typed::<TimeTrackListResponse>(&data) {
            debug!(
                "Timetrack {}..{}: {} user-days, next page from {:?}",
                list.date_from,
                list.date_to,
                list.data.len(),
                list.next_date_from
            );
        }
        pretty_json(&data)
    }
}

pub struct GetTimetrackRecordTool;

impl ActitimeTool for GetTimetrackRecordTool {
    const NAME: &'static str = "get_timetrack_record";
    const DESCRIPTION: &'static str =
        "Get the time tracked by a user on a specific task and date";
    type Params = TimetrackRecordParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let record = client
            .get_time_track_record(&params.user_id, &params.date, params.task_id)
            .await?;
        pretty_json(&record)
    }
}

pub struct SetTimetrackTool;

impl ActitimeTool for SetTimetrackTool {
    const NAME: &'static str = "set_timetrack";
    const DESCRIPTION: &'static str = "Set time tracked for a specific user, date, and task";
    type Params = SetTimetrackParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let SetTimetrackParams {
            user_id,
            date,
            task_id,
            time,
            comment,
        } = params;
        info!("Setting {} minutes on task {} for {} ({})", time, task_id, user_id, date);

        let result = client
            .set_time_track(&user_id, &date, task_id, &TimeTrackUpdate { time, comment })
            .await?;
        if let Some(record) = typed::<TimeTrackRecord>(&result) {
            debug!("Task {} now at {} minutes", record.task_id, record.time);
        }
        confirmation(
            format!("Time set successfully: {} minutes on task {}", time, task_id),
            &result,
        )
    }
}

pub struct AdjustTimetrackTool;

impl ActitimeTool for AdjustTimetrackTool {
    const NAME: &'static str = "adjust_timetrack";
    const DESCRIPTION: &'static str = "Adjust time tracked by adding or subtracting minutes";
    type Params = AdjustTimetrackParams;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let result = client
            .adjust_time_track(&params.user_id, &params.date, params.task_id, params.delta)
            .await?;
        confirmation(format!("Time adjusted by {} minutes", params.delta), &result)
    }
}

pub struct LockTimetrackTool;

impl ActitimeTool for LockTimetrackTool {
    const NAME: &'static str = "lock_timetrack";
    const DESCRIPTION: &'static str = "Lock time tracking for specified users and date range";
    type Params = LockRange;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let result = client.lock_time_track(&params).await?;
        confirmation("Timetrack locked", &result)
    }
}

pub struct UnlockTimetrackTool;

impl ActitimeTool for UnlockTimetrackTool {
    const NAME: &'static str = "unlock_timetrack";
    const DESCRIPTION: &'static str = "Unlock time tracking for specified users and date range";
    type Params = LockRange;

    async fn execute(client: &ActitimeClient, params: Self::Params) -> ToolResult<String> {
        let result = client.unlock_time_track(&params).await?;
        confirmation("Timetrack unlocked", &result)
    }
}
