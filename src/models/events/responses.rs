use serde::Serialize;
use ts_rs::TS;

use super::entities::CalendarEvent;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventListResponse {
    pub items: Vec<CalendarEvent>,
}
