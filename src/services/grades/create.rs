use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::summary::validate_score_and_term;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode, grades::requests::CreateGradeRequest,
    notifications::entities::NotificationKind,
};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, internal_error, load_subject,
    not_found, notify, storage_error,
};
use crate::utils::validate::{optional_text, required_text};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    mut req: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    req.title = match required_text("title", &req.title, 128) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    req.comment = optional_text(req.comment);
    if let Err(msg) =
        validate_score_and_term(Some(req.score), Some(req.term), &AppConfig::get().school)
    {
        return Ok(bad_request(ErrorCode::GradeOutOfRange, msg));
    }

    let subject = match load_subject(&storage, req.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can grade it",
        ));
    }

    match storage.is_student_enrolled(subject.id, req.student_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(not_found(
                ErrorCode::StudentNotEnrolled,
                "Student is not enrolled in this subject",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to check enrolment", e)),
    }

    // 成绩记在任课教师名下
    match storage.create_grade(subject.teacher_id, req).await {
        Ok(grade) => {
            notify(
                &storage,
                vec![grade.student_id],
                NotificationKind::Grade,
                format!("New grade in {}", subject.name),
                format!("{}: {}", grade.title, grade.score),
                Some(format!("/grades?subject_id={}", subject.id)),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade created successfully")))
        }
        Err(e) => Ok(storage_error("Failed to create grade", e)),
    }
}
