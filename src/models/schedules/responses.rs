use serde::Serialize;
use ts_rs::TS;

use super::entities::{ScheduleConflict, ScheduleSlot};

// 带科目信息的课程时段
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleSlotView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub slot: ScheduleSlot,
    pub subject_name: String,
    pub course: String,
    pub teacher_id: i64,
    pub has_conflict: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleResponse {
    pub items: Vec<ScheduleSlotView>,
    pub conflicts: Vec<ScheduleConflict>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleConflictsResponse {
    pub conflicts: Vec<ScheduleConflict>,
}

// 创建/更新时段的响应，附带新时段引入的冲突
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleSlotMutationResponse {
    pub slot: ScheduleSlot,
    pub conflicts: Vec<ScheduleConflict>,
}
