use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ClaimStatus, RepEventStatus};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct RepEventListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<RepEventStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct CreateRepEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct UpdateRepEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub capacity: Option<i32>,
    pub status: Option<RepEventStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct ClaimListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ClaimStatus>,
}

// 申诉列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClaimListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<ClaimStatus>,
    pub author_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct CreateClaimRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
}

// 处理申诉
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct RespondClaimRequest {
    pub status: ClaimStatus,
    pub response: Option<String>,
}
