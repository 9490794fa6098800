use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 考勤状态
    AttendanceStatus, "../frontend/src/types/generated/attendance.ts" {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Justified => "justified",
    }
}

define_string_enum! {
    /// 出勤状况：正常 / 临近失格 / 失格（libre）
    AttendanceStanding, "../frontend/src/types/generated/attendance.ts" {
        Regular => "regular",
        AtRisk => "at_risk",
        Libre => "libre",
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub subject_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub recorded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 某学生在某科目的出勤汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub student_id: i64,
    pub subject_id: i64,
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub justified: i64,
    /// 折算后的缺勤数（迟到按权重计入）
    pub absences: f64,
    pub attendance_percentage: f64,
    pub standing: AttendanceStanding,
}
