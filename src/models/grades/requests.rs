use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::GradeKind;
use crate::models::common::PaginationQuery;

// 录入成绩请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub subject_id: i64,
    pub student_id: i64,
    pub title: String,
    pub kind: GradeKind,
    pub score: f64,
    pub term: i32,
    pub comment: Option<String>,
    /// 默认为当天
    pub graded_on: Option<NaiveDate>,
}

// 更新成绩请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub title: Option<String>,
    pub kind: Option<GradeKind>,
    pub score: Option<f64>,
    pub term: Option<i32>,
    pub comment: Option<String>,
    pub graded_on: Option<NaiveDate>,
}

// 成绩列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub term: Option<i32>,
}

// 成绩列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_ids: Option<Vec<i64>>,
    pub term: Option<i32>,
}

// 成绩汇总查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSummaryParams {
    pub subject_id: i64,
    pub student_id: Option<i64>,
}
