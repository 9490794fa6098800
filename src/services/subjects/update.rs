use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest, users::entities::UserRole,
};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, internal_error, scoped_subject,
    storage_error,
};
use crate::utils::validate::{normalize_course, required_text};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    mut update: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let subject = match scoped_subject(&storage, request, subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can update it",
        ));
    }

    if let Some(name) = update.name.as_deref() {
        match required_text("name", name, 128) {
            Ok(name) => update.name = Some(name),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }
    if let Some(course) = update.course.as_deref() {
        match normalize_course(course) {
            Some(course) => update.course = Some(course),
            None => return Ok(bad_request(ErrorCode::ValidationFailed, "course must not be empty")),
        }
    }

    // 只有管理员可以更换任课教师
    if let Some(teacher_id) = update.teacher_id
        && teacher_id != subject.teacher_id
    {
        if user.role != UserRole::Admin {
            return Ok(forbidden(
                ErrorCode::SubjectPermissionDenied,
                "Only administrators can reassign a subject",
            ));
        }
        match storage.get_user_by_id(teacher_id).await {
            Ok(Some(teacher)) if teacher.role == UserRole::Teacher => {}
            Ok(_) => {
                return Ok(bad_request(
                    ErrorCode::ValidationFailed,
                    "teacher_id must reference a teacher",
                ));
            }
            Err(e) => return Ok(internal_error("Failed to load teacher", e)),
        }
    }

    // 改名或换班级后仍需保持 (name, course) 唯一
    let name = update.name.clone().unwrap_or_else(|| subject.name.clone());
    let course = update.course.clone().unwrap_or_else(|| subject.course.clone());
    match storage.get_subject_by_name_and_course(&name, &course).await {
        Ok(Some(existing)) if existing.id != subject.id => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                format!("Subject '{name}' already exists in course {course}"),
            )));
        }
        Ok(_) => {}
        Err(e) => return Ok(internal_error("Failed to check subject", e)),
    }

    match storage.update_subject(subject.id, update).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => Ok(storage_error("Failed to update subject", e)),
    }
}
