use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::detail::load_grade_with_subject;
use super::summary::validate_score_and_term;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, grades::requests::UpdateGradeRequest};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, not_found, storage_error,
};
use crate::utils::validate::required_text;

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
    mut update: UpdateGradeRequest,
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
            "Only the subject teacher or an administrator can edit grades",
        ));
    }

    if let Some(title) = update.title.as_deref() {
        match required_text("title", title, 128) {
            Ok(title) => update.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }
    if let Err(msg) = validate_score_and_term(update.score, update.term, &AppConfig::get().school) {
        return Ok(bad_request(ErrorCode::GradeOutOfRange, msg));
    }

    match storage.update_grade(grade.id, update).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Grade updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_error("Failed to update grade", e)),
    }
}
