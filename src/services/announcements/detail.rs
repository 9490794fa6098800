use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AnnouncementService;
use crate::models::{
    ApiResponse, ErrorCode,
    announcements::entities::{Announcement, Audience},
    users::entities::{User, UserRole},
};
use crate::services::{current_user, forbidden, internal_error, not_found};
use crate::storage::Storage;

pub(crate) async fn load_announcement(
    storage: &Arc<dyn Storage>,
    announcement_id: i64,
) -> Result<Announcement, HttpResponse> {
    match storage.get_announcement_by_id(announcement_id).await {
        Ok(Some(announcement)) => Ok(announcement),
        Ok(None) => Err(not_found(
            ErrorCode::AnnouncementNotFound,
            "Announcement not found",
        )),
        Err(e) => Err(internal_error("Failed to load announcement", e)),
    }
}

/// 作者或管理员
pub(crate) fn ensure_author_or_admin(
    user: &User,
    announcement: &Announcement,
) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin || announcement.author_id == user.id {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::Forbidden,
            "Only the author or an administrator can modify this announcement",
        ))
    }
}

/// 学生代表只能面向学生或全体发布
pub(crate) fn audience_allowed(role: UserRole, audience: Audience) -> bool {
    role != UserRole::StudentRep || matches!(audience, Audience::All | Audience::Students)
}

pub async fn get_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let announcement = match load_announcement(&storage, announcement_id).await {
        Ok(announcement) => announcement,
        Err(response) => return Ok(response),
    };
    // 不可见的公告按不存在处理
    if !announcement.is_visible_to(&user) {
        return Ok(not_found(
            ErrorCode::AnnouncementNotFound,
            "Announcement not found",
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        announcement,
        "Announcement retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_rep_audiences() {
        assert!(audience_allowed(UserRole::StudentRep, Audience::All));
        assert!(audience_allowed(UserRole::StudentRep, Audience::Students));
        assert!(!audience_allowed(UserRole::StudentRep, Audience::Teachers));
        assert!(!audience_allowed(UserRole::StudentRep, Audience::Preceptors));
        assert!(audience_allowed(UserRole::Teacher, Audience::Preceptors));
    }
}
