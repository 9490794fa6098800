use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::requests::CreateSubjectRequest,
    users::entities::UserRole,
};
use crate::services::{bad_request, current_user, forbidden, internal_error, storage_error};
use crate::utils::validate::{normalize_course, optional_text, required_text};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut req: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    req.name = match required_text("name", &req.name, 128) {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    let Some(course) = normalize_course(&req.course) else {
        return Ok(bad_request(ErrorCode::ValidationFailed, "course must not be empty"));
    };
    req.description = optional_text(req.description);

    // 教师只能给自己创建科目，管理员必须指定任课教师
    let teacher_id = match user.role {
        UserRole::Teacher => {
            if req.teacher_id.is_some_and(|id| id != user.id) {
                return Ok(forbidden(
                    ErrorCode::SubjectPermissionDenied,
                    "Teachers can only create their own subjects",
                ));
            }
            user.id
        }
        UserRole::Admin => {
            let Some(teacher_id) = req.teacher_id else {
                return Ok(bad_request(ErrorCode::ValidationFailed, "teacher_id is required"));
            };
            match storage.get_user_by_id(teacher_id).await {
                Ok(Some(teacher)) if teacher.role == UserRole::Teacher => teacher.id,
                Ok(Some(_)) => {
                    return Ok(bad_request(
                        ErrorCode::ValidationFailed,
                        "teacher_id must reference a teacher",
                    ));
                }
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::UserNotFound,
                        "Teacher not found",
                    )));
                }
                Err(e) => return Ok(internal_error("Failed to load teacher", e)),
            }
        }
        _ => {
            return Ok(forbidden(
                ErrorCode::SubjectPermissionDenied,
                "Only teachers and administrators can create subjects",
            ));
        }
    };

    // (name, course) 唯一
    match storage.get_subject_by_name_and_course(&req.name, &course).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                format!("Subject '{}' already exists in course {course}", req.name),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check subject", e)),
    }
    req.course = course;

    match storage.create_subject(teacher_id, req).await {
        Ok(subject) => {
            tracing::info!("Subject {} created for teacher {}", subject.id, teacher_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(storage_error("Failed to create subject", e)),
    }
}
