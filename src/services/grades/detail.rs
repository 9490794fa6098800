use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::GradeService;
use crate::middlewares::SubjectAccess;
use crate::models::{
    ApiResponse, ErrorCode, grades::entities::Grade, subjects::entities::Subject,
};
use crate::services::{
    current_user, forbidden, has_subject_access, internal_error, load_subject, not_found,
};
use crate::storage::Storage;

/// 读取成绩及其科目
pub(crate) async fn load_grade_with_subject(
    storage: &Arc<dyn Storage>,
    grade_id: i64,
) -> Result<(Grade, Subject), HttpResponse> {
    let grade = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Err(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => return Err(internal_error("Failed to load grade", e)),
    };
    let subject = load_subject(storage, grade.subject_id).await?;
    Ok((grade, subject))
}

pub async fn get_grade(
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

    // 学生只能看自己的成绩
    let allowed = if user.role.is_student() {
        grade.student_id == user.id
    } else {
        has_subject_access(SubjectAccess::Staff, &user, &subject, false)
    };
    if !allowed {
        return Ok(forbidden(ErrorCode::Forbidden, "No permission to view this grade"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade retrieved successfully")))
}
