use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 校历事件类型
    EventKind, "../frontend/src/types/generated/event.ts" {
        Exam => "exam",
        Holiday => "holiday",
        Meeting => "meeting",
        Activity => "activity",
        Deadline => "deadline",
    }
}

// 校历事件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: EventKind,
    pub subject_id: Option<i64>,
    pub course: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
