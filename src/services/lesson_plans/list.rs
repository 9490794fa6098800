use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use crate::models::{
    ApiResponse,
    lesson_plans::requests::{LessonPlanListParams, LessonPlanListQuery},
};
use crate::services::{current_user, internal_error};

pub async fn list_plans(
    service: &LessonPlanService,
    request: &HttpRequest,
    query: LessonPlanListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let list_query = LessonPlanListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        subject_id: query.subject_id,
        teacher_id: (!user.role.is_school_staff()).then_some(user.id),
        status: query.status,
    };

    match storage.list_lesson_plans_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lesson plans retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list lesson plans", e)),
    }
}
