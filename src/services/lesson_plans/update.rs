use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use super::detail::load_visible_plan;
use crate::models::{
    ApiResponse, ErrorCode,
    lesson_plans::{entities::LessonPlan, requests::UpdateLessonPlanRequest},
    users::entities::User,
};
use crate::services::{
    bad_request, current_user, events::check_date_range, forbidden, not_found, storage_error,
};
use crate::utils::validate::required_text;

/// 只有作者可以修改，且计划处于草稿或驳回状态
pub(crate) fn ensure_editable(user: &User, plan: &LessonPlan) -> Result<(), HttpResponse> {
    if plan.teacher_id != user.id {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "Only the author can modify this lesson plan",
        ));
    }
    if !plan.status.is_editable() {
        return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::LessonPlanNotEditable,
            format!("Lesson plan is {} and cannot be modified", plan.status),
        )));
    }
    Ok(())
}

pub async fn update_plan(
    service: &LessonPlanService,
    request: &HttpRequest,
    plan_id: i64,
    mut update: UpdateLessonPlanRequest,
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
    if let Err(response) = ensure_editable(&user, &plan) {
        return Ok(response);
    }

    if let Some(title) = update.title.as_deref() {
        match required_text("title", title, 200) {
            Ok(title) => update.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }
    if let Some(content) = update.content.as_deref() {
        match required_text("content", content, 50_000) {
            Ok(content) => update.content = Some(content),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }
    let starts_on = update.starts_on.unwrap_or(plan.starts_on);
    let ends_on = update.ends_on.unwrap_or(plan.ends_on);
    if let Err(msg) = check_date_range(starts_on, ends_on) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    match storage.update_lesson_plan(plan.id, update).await {
        Ok(Some(plan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            plan,
            "Lesson plan updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::LessonPlanNotFound, "Lesson plan not found")),
        Err(e) => Ok(storage_error("Failed to update lesson plan", e)),
    }
}
