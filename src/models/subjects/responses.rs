use super::entities::{Subject, SubjectStudent};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserBrief;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct EnrollStudentsResponse {
    /// 本次新增的选课记录
    pub enrolled: Vec<SubjectStudent>,
    /// 已经在科目中的学生，被跳过
    pub skipped: Vec<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectStudentsResponse {
    pub subject_id: i64,
    pub items: Vec<UserBrief>,
}
