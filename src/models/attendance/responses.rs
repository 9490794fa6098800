use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceRecord, AttendanceSummary};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RecordAttendanceResponse {
    pub subject_id: i64,
    pub items: Vec<AttendanceRecord>,
}

// 科目全体学生的出勤报表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SubjectAttendanceReport {
    pub subject_id: i64,
    pub summaries: Vec<AttendanceSummary>,
}
