use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AttendanceService;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    attendance::requests::{AttendanceListParams, AttendanceListQuery},
    subjects::requests::SubjectListQuery,
    users::entities::{User, UserRole},
};
use crate::services::{current_user, internal_error};
use crate::storage::Storage;

/// 教师能看到的科目 ID
pub(crate) async fn teacher_subject_ids(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<Vec<i64>> {
    let subjects = storage
        .list_all_subjects(SubjectListQuery {
            teacher_id: Some(teacher_id),
            ..Default::default()
        })
        .await?;
    Ok(subjects.into_iter().map(|s| s.id).collect())
}

/// 学生只看自己，教师只看自己的科目，行政人员不受限
pub(crate) async fn scope_attendance_query(
    storage: &Arc<dyn Storage>,
    user: &User,
    params: AttendanceListParams,
) -> Result<AttendanceListQuery> {
    let mut query = AttendanceListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        subject_id: params.subject_id,
        student_id: params.student_id,
        subject_ids: None,
        status: params.status,
        date_from: params.date_from,
        date_to: params.date_to,
    };

    match user.role {
        UserRole::Student | UserRole::StudentRep => query.student_id = Some(user.id),
        UserRole::Teacher => {
            query.subject_ids = Some(teacher_subject_ids(storage, user.id).await?);
        }
        UserRole::Preceptor | UserRole::Admin => {}
    }
    Ok(query)
}

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    params: AttendanceListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let query = match scope_attendance_query(&storage, &user, params).await {
        Ok(query) => query,
        Err(e) => return Ok(internal_error("Failed to resolve visible subjects", e)),
    };

    match storage.list_attendance_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance records retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve attendance records", e)),
    }
}
