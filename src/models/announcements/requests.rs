use serde::Deserialize;
use ts_rs::TS;

use super::entities::Audience;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject_id: Option<i64>,
}

// 公告列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AnnouncementListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    /// 为空表示不按受众过滤（管理员）
    pub audiences: Option<Vec<Audience>>,
    /// 学生所在班级；Some 时只返回未限定班级或班级匹配的公告
    pub student_course: Option<Option<String>>,
    /// 作者本人的公告始终可见
    pub author_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub course: Option<String>,
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub audience: Option<Audience>,
    pub course: Option<String>,
    pub pinned: Option<bool>,
}
