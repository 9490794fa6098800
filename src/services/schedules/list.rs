use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::ScheduleService;
use super::conflicts::{PlacedSlot, build_views, detect_conflicts};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    schedules::{
        entities::ScheduleSlot,
        requests::ScheduleQueryParams,
        responses::{ScheduleConflictsResponse, ScheduleResponse},
    },
    subjects::{entities::Subject, requests::SubjectListQuery},
    users::entities::{User, UserRole},
};
use crate::services::{current_user, internal_error};
use crate::storage::Storage;

/// 当前用户可见的科目：学生看选修的，教师看自己的，行政人员按条件过滤
pub(crate) async fn visible_subjects(
    storage: &Arc<dyn Storage>,
    user: &User,
    query: &ScheduleQueryParams,
) -> Result<Vec<Subject>> {
    let mut list_query = SubjectListQuery::default();
    match user.role {
        UserRole::Student | UserRole::StudentRep => list_query.student_id = Some(user.id),
        UserRole::Teacher => list_query.teacher_id = Some(user.id),
        UserRole::Preceptor | UserRole::Admin => {
            list_query.course = query.course.clone();
            list_query.teacher_id = query.teacher_id;
        }
    }

    let mut subjects = storage.list_all_subjects(list_query).await?;
    if let Some(subject_id) = query.subject_id {
        subjects.retain(|s| s.id == subject_id);
    }
    Ok(subjects)
}

/// 加载课表并计算冲突，首页也会调用
pub(crate) async fn load_timetable(
    storage: &Arc<dyn Storage>,
    user: &User,
    query: &ScheduleQueryParams,
) -> Result<ScheduleResponse> {
    let subjects = visible_subjects(storage, user, query).await?;
    let ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
    let slots = storage.list_schedule_slots(Some(ids)).await?;
    Ok(assemble_timetable(&subjects, &slots))
}

pub(crate) fn assemble_timetable(subjects: &[Subject], slots: &[ScheduleSlot]) -> ScheduleResponse {
    let by_id: HashMap<i64, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();
    let placed: Vec<PlacedSlot<'_>> = slots
        .iter()
        .filter_map(|slot| {
            by_id
                .get(&slot.subject_id)
                .map(|subject| PlacedSlot { slot, subject })
        })
        .collect();

    let conflicts = detect_conflicts(&placed);
    ScheduleResponse {
        items: build_views(&placed, &conflicts),
        conflicts,
    }
}

pub async fn get_timetable(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match load_timetable(&storage, &user, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Timetable retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load timetable", e)),
    }
}

pub async fn list_conflicts(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match load_timetable(&storage, &user, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScheduleConflictsResponse {
                conflicts: response.conflicts,
            },
            "Schedule conflicts retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to detect schedule conflicts", e)),
    }
}
