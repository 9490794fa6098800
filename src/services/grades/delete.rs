use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::detail::load_grade_with_subject;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{can_manage_subject, current_user, forbidden, internal_error, not_found};

pub async fn delete_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (grade, subject) = match load_grade_with_subject(&storage, grade_id).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can delete grades",
        ));
    }

    match storage.delete_grade(grade.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(internal_error("Failed to delete grade", e)),
    }
}
