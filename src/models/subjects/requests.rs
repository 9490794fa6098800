use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 科目查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course: Option<String>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

// 科目列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course: Option<String>,
    pub teacher_id: Option<i64>,
    /// 仅返回该学生选修的科目
    pub student_id: Option<i64>,
    pub search: Option<String>,
}

// 创建科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub course: String,
    /// 管理员创建时必须指定；教师创建时默认为自己
    pub teacher_id: Option<i64>,
    pub description: Option<String>,
}

// 更新科目请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub course: Option<String>,
    pub teacher_id: Option<i64>,
    pub description: Option<String>,
}

// 批量选课请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct EnrollStudentsRequest {
    pub student_ids: Vec<i64>,
}
