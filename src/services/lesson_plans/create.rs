use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use crate::models::{ApiResponse, ErrorCode, lesson_plans::requests::CreateLessonPlanRequest};
use crate::services::{
    bad_request, current_user, events::check_date_range, forbidden, load_subject, storage_error,
};
use crate::utils::validate::{optional_text, required_text};

pub async fn create_plan(
    service: &LessonPlanService,
    request: &HttpRequest,
    mut req: CreateLessonPlanRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    req.title = match required_text("title", &req.title, 200) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    req.content = match required_text("content", &req.content, 50_000) {
        Ok(content) => content,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    req.objectives = optional_text(req.objectives);
    if let Err(msg) = check_date_range(req.starts_on, req.ends_on) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let subject = match load_subject(&storage, req.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    // 只有任课教师本人可以编写计划
    if subject.teacher_id != user.id {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher can create lesson plans",
        ));
    }

    match storage.create_lesson_plan(user.id, req).await {
        Ok(plan) => Ok(HttpResponse::Created().json(ApiResponse::success(
            plan,
            "Lesson plan created successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to create lesson plan", e)),
    }
}
