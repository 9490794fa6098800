use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::LessonPlanService;
use crate::models::{
    ApiResponse, ErrorCode, lesson_plans::entities::LessonPlan, users::entities::User,
};
use crate::services::{current_user, internal_error, not_found};
use crate::storage::Storage;

/// 教师只能看到自己的计划，学务人员和管理员可以看到全部
pub(crate) async fn load_visible_plan(
    storage: &Arc<dyn Storage>,
    user: &User,
    plan_id: i64,
) -> Result<LessonPlan, HttpResponse> {
    match storage.get_lesson_plan_by_id(plan_id).await {
        Ok(Some(plan)) if plan.teacher_id == user.id || user.role.is_school_staff() => Ok(plan),
        Ok(_) => Err(not_found(ErrorCode::LessonPlanNotFound, "Lesson plan not found")),
        Err(e) => Err(internal_error("Failed to load lesson plan", e)),
    }
}

pub async fn get_plan(
    service: &LessonPlanService,
    request: &HttpRequest,
    plan_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match load_visible_plan(&storage, &user, plan_id).await {
        Ok(plan) => Ok(HttpResponse::Ok().json(ApiResponse::success(plan, "Lesson plan retrieved successfully"))),
        Err(response) => Ok(response),
    }
}
