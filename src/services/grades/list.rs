use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{
    ApiResponse,
    grades::requests::{GradeListParams, GradeListQuery},
    users::entities::UserRole,
};
use crate::services::attendance::list::teacher_subject_ids;
use crate::services::{current_user, internal_error};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    params: GradeListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let mut query = GradeListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        subject_id: params.subject_id,
        student_id: params.student_id,
        subject_ids: None,
        term: params.term,
    };

    // 权限过滤
    match user.role {
        UserRole::Student | UserRole::StudentRep => query.student_id = Some(user.id),
        UserRole::Teacher => match teacher_subject_ids(&storage, user.id).await {
            Ok(ids) => query.subject_ids = Some(ids),
            Err(e) => return Ok(internal_error("Failed to resolve visible subjects", e)),
        },
        UserRole::Preceptor | UserRole::Admin => {}
    }

    match storage.list_grades_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve grades", e)),
    }
}
