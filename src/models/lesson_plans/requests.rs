use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::LessonPlanStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_plan.ts")]
pub struct LessonPlanListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject_id: Option<i64>,
    pub status: Option<LessonPlanStatus>,
}

// 教学计划列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct LessonPlanListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub status: Option<LessonPlanStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_plan.ts")]
pub struct CreateLessonPlanRequest {
    pub subject_id: i64,
    pub title: String,
    pub objectives: Option<String>,
    pub content: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_plan.ts")]
pub struct UpdateLessonPlanRequest {
    pub title: Option<String>,
    pub objectives: Option<String>,
    pub content: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

// 审核教学计划
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_plan.ts")]
pub struct ReviewLessonPlanRequest {
    pub status: LessonPlanStatus,
    pub comment: Option<String>,
}
