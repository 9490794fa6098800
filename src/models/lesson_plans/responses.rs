use serde::Serialize;
use ts_rs::TS;

use super::entities::LessonPlan;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_plan.ts")]
pub struct LessonPlanListResponse {
    pub items: Vec<LessonPlan>,
    pub pagination: PaginationInfo,
}
