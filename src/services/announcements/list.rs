use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AnnouncementService;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    announcements::{
        entities::{Announcement, Audience},
        requests::{AnnouncementListParams, AnnouncementListQuery},
    },
    users::entities::User,
};
use crate::services::{current_user, internal_error};
use crate::storage::Storage;

/// 按查看者的角色构造可见性条件，管理员不做限制
fn visibility_query(user: &User, subject_id: Option<i64>) -> AnnouncementListQuery {
    let mut query = AnnouncementListQuery {
        subject_id,
        ..Default::default()
    };

    if let Some(group) = Audience::for_role(user.role) {
        query.audiences = Some(vec![Audience::All, group]);
        query.author_id = Some(user.id);
        // 只有学生受班级限制
        if user.role.is_student() {
            query.student_course = Some(user.course.clone());
        }
    }
    query
}

/// 仪表盘使用的最新公告
pub(crate) async fn latest_visible(
    storage: &Arc<dyn Storage>,
    user: &User,
    limit: i64,
) -> Result<Vec<Announcement>> {
    let mut query = visibility_query(user, None);
    query.page = Some(1);
    query.size = Some(limit);
    Ok(storage.list_announcements_with_pagination(query).await?.items)
}

pub async fn list_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
    params: AnnouncementListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let mut query = visibility_query(&user, params.subject_id);
    query.page = Some(params.pagination.page);
    query.size = Some(params.pagination.size);

    match storage.list_announcements_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Announcements retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list announcements", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::user;

    #[test]
    fn test_admin_sees_everything() {
        let query = visibility_query(&user(1, UserRole::Admin), None);
        assert!(query.audiences.is_none());
        assert!(query.author_id.is_none());
        assert!(query.student_course.is_none());
    }

    #[test]
    fn test_student_is_filtered_by_course() {
        let mut student = user(10, UserRole::StudentRep);
        student.course = Some("5A".into());
        let query = visibility_query(&student, Some(3));
        assert_eq!(query.audiences, Some(vec![Audience::All, Audience::Students]));
        assert_eq!(query.student_course, Some(Some("5A".to_string())));
        assert_eq!(query.author_id, Some(10));
        assert_eq!(query.subject_id, Some(3));
    }

    #[test]
    fn test_staff_ignore_course() {
        let query = visibility_query(&user(5, UserRole::Preceptor), None);
        assert_eq!(query.audiences, Some(vec![Audience::All, Audience::Preceptors]));
        assert!(query.student_course.is_none());
    }
}
