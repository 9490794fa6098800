use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::GradeService;
use super::summary::{report_card, summarize};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::middlewares::SubjectAccess;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        entities::GradeSummary, requests::GradeSummaryParams, responses::SubjectGradeReport,
    },
    subjects::{entities::Subject, requests::SubjectListQuery},
    users::entities::UserRole,
};
use crate::services::{
    check_subject_access, current_user, forbidden, internal_error, load_subject, not_found,
    resolve_summary_student, scoped_subject,
};
use crate::storage::Storage;

/// 学生在各科目的成绩汇总
pub(crate) async fn student_grade_summaries(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    subjects: &[Subject],
) -> Result<Vec<GradeSummary>> {
    let grades = storage.list_grades(None, Some(student_id)).await?;
    let rules = &AppConfig::get().school;
    Ok(subjects
        .iter()
        .map(|subject| summarize(student_id, subject.id, &grades, rules))
        .collect())
}

pub async fn get_summary(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeSummaryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, query.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    let student_id =
        match resolve_summary_student(&storage, &user, &subject, query.student_id).await {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

    match storage.list_grades(Some(subject.id), Some(student_id)).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(student_id, subject.id, &grades, &AppConfig::get().school),
            "Grade summary retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load grades", e)),
    }
}

pub async fn get_subject_report(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let subject = match scoped_subject(&storage, request, subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if let Err(response) =
        check_subject_access(&storage, SubjectAccess::Staff, &user, &subject).await
    {
        return Ok(response);
    }

    let students = match storage.list_subject_students(subject.id).await {
        Ok(students) => students,
        Err(e) => return Ok(internal_error("Failed to load enrolled students", e)),
    };
    let grades = match storage.list_grades(Some(subject.id), None).await {
        Ok(grades) => grades,
        Err(e) => return Ok(internal_error("Failed to load grades", e)),
    };

    let rules = &AppConfig::get().school;
    let summaries = students
        .iter()
        .map(|student| summarize(student.id, subject.id, &grades, rules))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectGradeReport {
            subject_id: subject.id,
            summaries,
        },
        "Grade report retrieved successfully",
    )))
}

pub async fn get_report_card(
    service: &GradeService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_user_by_id(student_id).await {
        Ok(Some(student)) if student.role.is_student() => {}
        Ok(_) => return Ok(not_found(ErrorCode::UserNotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Failed to load student", e)),
    }

    let subjects = match storage
        .list_all_subjects(SubjectListQuery {
            student_id: Some(student_id),
            ..Default::default()
        })
        .await
    {
        Ok(subjects) => subjects,
        Err(e) => return Ok(internal_error("Failed to load subjects", e)),
    };

    // 本人、行政人员，或者教授该学生某门课的教师
    let allowed = match user.role {
        UserRole::Preceptor | UserRole::Admin => true,
        UserRole::Teacher => subjects.iter().any(|s| s.teacher_id == user.id),
        UserRole::Student | UserRole::StudentRep => user.id == student_id,
    };
    if !allowed {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "No permission to view this report card",
        ));
    }

    match storage.list_grades(None, Some(student_id)).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report_card(student_id, &subjects, &grades, &AppConfig::get().school),
            "Report card retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load grades", e)),
    }
}
