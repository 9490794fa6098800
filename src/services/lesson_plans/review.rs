use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use super::detail::load_visible_plan;
use super::update::ensure_editable;
use crate::models::{
    ApiResponse, ErrorCode,
    lesson_plans::{entities::LessonPlanStatus, requests::ReviewLessonPlanRequest},
    notifications::entities::NotificationKind,
    users::entities::UserRole,
};
use crate::services::{
    bad_request, current_user, forbidden, not_found, notify, storage_error,
};
use crate::utils::validate::optional_text;

/// 审核前校验：只能审核已提交的计划，驳回必须附带意见
fn check_review(
    current: LessonPlanStatus,
    outcome: LessonPlanStatus,
    comment: Option<&str>,
) -> Result<(), (ErrorCode, String)> {
    if !outcome.is_review_outcome() {
        return Err((
            ErrorCode::ValidationFailed,
            format!("Review outcome must be approved or rejected, got {outcome}"),
        ));
    }
    if current != LessonPlanStatus::Submitted {
        return Err((
            ErrorCode::InvalidStatusTransition,
            format!("Only submitted lesson plans can be reviewed, this one is {current}"),
        ));
    }
    if outcome == LessonPlanStatus::Rejected && comment.is_none() {
        return Err((
            ErrorCode::ValidationFailed,
            "A comment is required when rejecting a lesson plan".to_string(),
        ));
    }
    Ok(())
}

pub async fn submit_plan(
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
    if let Err(response) = ensure_editable(&user, &plan) {
        return Ok(response);
    }

    // 重新提交时保留上次的审核意见，供审核人参考
    match storage
        .set_lesson_plan_status(plan.id, LessonPlanStatus::Submitted, plan.review_comment, None)
        .await
    {
        Ok(Some(plan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            plan,
            "Lesson plan submitted successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::LessonPlanNotFound, "Lesson plan not found")),
        Err(e) => Ok(storage_error("Failed to submit lesson plan", e)),
    }
}

pub async fn review_plan(
    service: &LessonPlanService,
    request: &HttpRequest,
    plan_id: i64,
    req: ReviewLessonPlanRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if user.role != UserRole::Admin {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "Only administrators can review lesson plans",
        ));
    }
    let storage = service.get_storage(request);

    let plan = match load_visible_plan(&storage, &user, plan_id).await {
        Ok(plan) => plan,
        Err(response) => return Ok(response),
    };
    let comment = optional_text(req.comment);
    if let Err((code, msg)) = check_review(plan.status, req.status, comment.as_deref()) {
        return Ok(if code == ErrorCode::InvalidStatusTransition {
            HttpResponse::Conflict().json(ApiResponse::error_empty(code, msg))
        } else {
            bad_request(code, msg)
        });
    }

    match storage
        .set_lesson_plan_status(plan.id, req.status, comment, Some(user.id))
        .await
    {
        Ok(Some(reviewed)) => {
            notify(
                &storage,
                vec![reviewed.teacher_id],
                NotificationKind::System,
                format!("Lesson plan \"{}\" was {}", reviewed.title, reviewed.status),
                reviewed.review_comment.clone().unwrap_or_default(),
                Some(format!("/lesson-plans/{}", reviewed.id)),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                reviewed,
                "Lesson plan reviewed successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::LessonPlanNotFound, "Lesson plan not found")),
        Err(e) => Ok(storage_error("Failed to review lesson plan", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_submitted_plans_are_reviewed() {
        assert!(check_review(LessonPlanStatus::Submitted, LessonPlanStatus::Approved, None).is_ok());
        let (code, _) =
            check_review(LessonPlanStatus::Draft, LessonPlanStatus::Approved, None).unwrap_err();
        assert_eq!(code, ErrorCode::InvalidStatusTransition);
        let (code, _) =
            check_review(LessonPlanStatus::Approved, LessonPlanStatus::Rejected, Some("no"))
                .unwrap_err();
        assert_eq!(code, ErrorCode::InvalidStatusTransition);
    }

    #[test]
    fn test_review_outcome_must_be_final() {
        let (code, _) =
            check_review(LessonPlanStatus::Submitted, LessonPlanStatus::Draft, None).unwrap_err();
        assert_eq!(code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_rejection_requires_comment() {
        assert!(check_review(LessonPlanStatus::Submitted, LessonPlanStatus::Rejected, None).is_err());
        assert!(
            check_review(
                LessonPlanStatus::Submitted,
                LessonPlanStatus::Rejected,
                Some("Faltan objetivos")
            )
            .is_ok()
        );
    }
}
