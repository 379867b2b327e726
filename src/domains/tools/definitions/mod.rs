//! Tool definitions module.
//!
//! Tools are grouped by theme, one file per group. Each group exposes a
//! `tools()` function returning its entries; the registry merges all groups
//! into one flat namespace.

pub mod common;
pub mod leavetime;
pub mod projects;
pub mod tasks;
pub mod timetrack;
pub mod users;

pub use leavetime::{
    AdjustLeavetimeTool, GetLeaveTypeTool, GetLeaveTypesTool, GetLeavetimeTool, SetLeavetimeTool,
};
pub use projects::{GetCustomerTool, GetCustomersTool, GetProjectTool, GetProjectsTool};
pub use tasks::{CreateTaskTool, GetTaskTool, GetTasksTool, UpdateTaskTool};
pub use timetrack::{
    AdjustTimetrackTool, GetTimetrackRecordTool, GetTimetrackTool, LockTimetrackTool,
    SetTimetrackTool, UnlockTimetrackTool,
};
pub use users::{GetCurrentUserTool, GetUserTool, GetUsersTool};
