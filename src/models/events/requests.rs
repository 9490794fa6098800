use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::EventKind;

#[derive(Debug, Default, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub subject_id: Option<i64>,
    pub course: Option<String>,
    pub kind: Option<EventKind>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub kind: EventKind,
    pub subject_id: Option<i64>,
    pub course: Option<String>,
    pub starts_on: NaiveDate,
    /// 默认与开始日期相同
    pub ends_on: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<EventKind>,
    pub course: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}
