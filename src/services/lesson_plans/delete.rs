use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use super::detail::load_visible_plan;
use super::update::ensure_editable;
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::{current_user, internal_error, not_found};

pub async fn delete_plan(
    service: &LessonPlanService,
    request: &HttpRequest,
    plan_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let plan = match load_visible_plan(&storage, &user, plan_id).await {
        Ok(plan) => plan,
        Err(response) => return Ok(response),
    };
    // 管理员可以删除任意计划，作者只能删除未提交的计划
    if user.role != UserRole::Admin
        && let Err(response) = ensure_editable(&user, &plan)
    {
        return Ok(response);
    }

    match storage.delete_lesson_plan(plan.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Lesson plan deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::LessonPlanNotFound, "Lesson plan not found")),
        Err(e) => Ok(internal_error("Failed to delete lesson plan", e)),
    }
}
