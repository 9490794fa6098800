use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AnnouncementService;
use super::detail::audience_allowed;
use crate::models::{
    ApiResponse, ErrorCode, announcements::requests::CreateAnnouncementRequest,
    notifications::entities::NotificationKind,
};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, internal_error, load_subject,
    notify, storage_error,
};
use crate::utils::validate::required_text;

pub async fn create_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    mut req: CreateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    if !audience_allowed(user.role, req.audience) {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "Student representatives can only address students or everyone",
        ));
    }
    req.title = match required_text("title", &req.title, 200) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    req.content = match required_text("content", &req.content, 20_000) {
        Ok(content) => content,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    // 科目公告需要能管理该科目，发布后通知选课学生
    let subject = match req.subject_id {
        Some(subject_id) => {
            let subject = match load_subject(&storage, subject_id).await {
                Ok(subject) => subject,
                Err(response) => return Ok(response),
            };
            if !user.role.is_school_staff() && !can_manage_subject(&user, &subject) {
                return Ok(forbidden(
                    ErrorCode::SubjectPermissionDenied,
                    "No permission for this subject",
                ));
            }
            Some(subject)
        }
        None => None,
    };

    let announcement = match storage.create_announcement(user.id, req).await {
        Ok(announcement) => announcement,
        Err(e) => return Ok(storage_error("Failed to create announcement", e)),
    };
    info!(
        "Announcement {} published by user {} for {}",
        announcement.id, user.id, announcement.audience
    );

    if let Some(subject) = subject {
        let students = match storage.list_subject_students(subject.id).await {
            Ok(students) => students,
            Err(e) => return Ok(internal_error("Failed to load enrolled students", e)),
        };
        notify(
            &storage,
            students.into_iter().map(|s| s.id).collect(),
            NotificationKind::Announcement,
            format!("{}: {}", subject.name, announcement.title),
            announcement.content.chars().take(200).collect(),
            Some(format!("/announcements/{}", announcement.id)),
        )
        .await;
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        announcement,
        "Announcement created successfully",
    )))
}
