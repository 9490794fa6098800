use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 论坛主题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forum.ts")]
pub struct ForumThread {
    pub id: i64,
    /// 为空表示全校公共讨论区
    pub subject_id: Option<i64>,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub locked: bool,
    pub reply_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub last_activity_at: chrono::DateTime<chrono::Utc>,
}

// 论坛回复
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forum.ts")]
pub struct ForumReply {
    pub id: i64,
    pub thread_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
