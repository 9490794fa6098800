use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 通知类型
    NotificationKind, "../frontend/src/types/generated/notification.ts" {
        Grade => "grade",
        Attendance => "attendance",
        Announcement => "announcement",
        Forum => "forum",
        Event => "event",
        Claim => "claim",
        System => "system",
    }
}

// 站内通知
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub content: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
