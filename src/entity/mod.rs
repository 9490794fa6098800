//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间戳以秒存储，日期以 `YYYY-MM-DD` 字符串存储。

pub mod prelude;

pub mod announcements;
pub mod attendance_records;
pub mod calendar_events;
pub mod claims;
pub mod forum_replies;
pub mod forum_threads;
pub mod grades;
pub mod lesson_plans;
pub mod materials;
pub mod notifications;
pub mod rep_event_registrations;
pub mod rep_events;
pub mod schedule_slots;
pub mod subject_students;
pub mod subjects;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};

pub(crate) fn from_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

pub(crate) fn from_date_str(s: &str) -> NaiveDate {
    crate::utils::time::parse_date(s).unwrap_or_default()
}
