use serde::Serialize;
use ts_rs::TS;

use super::entities::{Grade, GradeSummary};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SubjectGradeReport {
    pub subject_id: i64,
    pub summaries: Vec<GradeSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCardEntry {
    pub subject_id: i64,
    pub subject_name: String,
    pub summary: GradeSummary,
}

// 学生成绩单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCard {
    pub student_id: i64,
    pub subjects: Vec<ReportCardEntry>,
    /// 各科平均分的平均值，没有任何成绩时为空
    pub overall_average: Option<f64>,
}
