use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AttendanceService;
use super::summary::{flagged_summaries, summarize, summarize_students};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::middlewares::SubjectAccess;
use crate::models::{
    ApiResponse,
    attendance::{
        entities::AttendanceSummary, requests::AttendanceSummaryParams,
        responses::SubjectAttendanceReport,
    },
    subjects::entities::Subject,
};
use crate::services::{
    check_subject_access, current_user, internal_error, load_subject, resolve_summary_student,
    scoped_subject,
};
use crate::storage::Storage;

/// 学生在各科目的出勤汇总
pub(crate) async fn student_summaries(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    subjects: &[Subject],
) -> Result<Vec<AttendanceSummary>> {
    let records = storage.list_attendance_records(None, Some(student_id)).await?;
    let rules = &AppConfig::get().school;
    Ok(subjects
        .iter()
        .map(|subject| summarize(student_id, subject.id, &records, rules))
        .collect())
}

/// 全校出勤异常（at_risk / libre）的 (学生, 科目)
pub(crate) async fn flagged_attendance(storage: &Arc<dyn Storage>) -> Result<Vec<AttendanceSummary>> {
    let records = storage.list_attendance_records(None, None).await?;
    Ok(flagged_summaries(&records, &AppConfig::get().school))
}

pub async fn get_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceSummaryParams,
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

    match storage
        .list_attendance_records(Some(subject.id), Some(student_id))
        .await
    {
        Ok(records) => {
            let summary = summarize(student_id, subject.id, &records, &AppConfig::get().school);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                summary,
                "Attendance summary retrieved successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to load attendance records", e)),
    }
}

pub async fn get_subject_report(
    service: &AttendanceService,
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
    let records = match storage.list_attendance_records(Some(subject.id), None).await {
        Ok(records) => records,
        Err(e) => return Ok(internal_error("Failed to load attendance records", e)),
    };

    let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    let summaries = summarize_students(
        subject.id,
        &student_ids,
        &records,
        &AppConfig::get().school,
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectAttendanceReport {
            subject_id: subject.id,
            summaries,
        },
        "Attendance report retrieved successfully",
    )))
}
