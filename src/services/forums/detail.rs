use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ForumService;
use crate::middlewares::SubjectAccess;
use crate::models::{
    ApiResponse, ErrorCode,
    forums::{entities::ForumThread, responses::ThreadDetailResponse},
    subjects::entities::Subject,
    users::entities::User,
};
use crate::services::{
    check_subject_access, current_user, internal_error, load_subject, not_found,
};
use crate::storage::Storage;

/// 加载主题并校验读取权限，返回主题所属科目（公共讨论区为 None）
pub(crate) async fn load_visible_thread(
    storage: &Arc<dyn Storage>,
    user: &User,
    thread_id: i64,
) -> Result<(ForumThread, Option<Subject>), HttpResponse> {
    let thread = match storage.get_thread_by_id(thread_id).await {
        Ok(Some(thread)) => thread,
        Ok(None) => return Err(not_found(ErrorCode::ThreadNotFound, "Thread not found")),
        Err(e) => return Err(internal_error("Failed to load thread", e)),
    };

    let subject = match thread.subject_id {
        Some(subject_id) => {
            let subject = load_subject(storage, subject_id).await?;
            check_subject_access(storage, SubjectAccess::Member, user, &subject).await?;
            Some(subject)
        }
        None => None,
    };
    Ok((thread, subject))
}

/// 版主：学务人员、管理员，或者科目讨论区的任课教师
pub(crate) fn is_moderator(user: &User, subject: Option<&Subject>) -> bool {
    user.role.is_school_staff() || subject.is_some_and(|s| s.teacher_id == user.id)
}

pub async fn get_thread(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (thread, _) = match load_visible_thread(&storage, &user, thread_id).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    match storage.list_replies(thread.id).await {
        Ok(replies) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ThreadDetailResponse { thread, replies },
            "Thread retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load replies", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{subject, user};

    #[test]
    fn test_moderators() {
        let math = subject(1, 7, "5A");
        assert!(is_moderator(&user(7, UserRole::Teacher), Some(&math)));
        assert!(!is_moderator(&user(8, UserRole::Teacher), Some(&math)));
        assert!(!is_moderator(&user(7, UserRole::Teacher), None));
        assert!(is_moderator(&user(2, UserRole::Preceptor), None));
        assert!(is_moderator(&user(1, UserRole::Admin), Some(&math)));
        assert!(!is_moderator(&user(10, UserRole::StudentRep), None));
    }
}
