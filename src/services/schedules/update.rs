use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use super::create::{apply_conflict_policy, school_conflicts};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    schedules::{requests::UpdateScheduleSlotRequest, responses::ScheduleSlotMutationResponse},
};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, internal_error, load_subject,
    not_found, storage_error,
};

pub async fn update_slot(
    service: &ScheduleService,
    request: &HttpRequest,
    slot_id: i64,
    update: UpdateScheduleSlotRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let existing = match storage.get_schedule_slot_by_id(slot_id).await {
        Ok(Some(slot)) => slot,
        Ok(None) => return Ok(not_found(ErrorCode::ScheduleSlotNotFound, "Schedule slot not found")),
        Err(e) => return Ok(internal_error("Failed to load schedule slot", e)),
    };
    let subject = match load_subject(&storage, existing.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can edit its schedule",
        ));
    }

    // 合并后的时段用于校验和冲突检测
    let mut candidate = existing.clone();
    if let Some(day) = update.day_of_week {
        candidate.day_of_week = day;
    }
    if let Some(start) = update.start_time {
        candidate.start_time = start;
    }
    if let Some(end) = update.end_time {
        candidate.end_time = end;
    }
    if let Some(ref classroom) = update.classroom {
        candidate.classroom = crate::utils::validate::optional_text(Some(classroom.clone()));
    }
    if candidate.start_time >= candidate.end_time {
        return Ok(bad_request(
            ErrorCode::ScheduleInvalidTime,
            "start_time must be earlier than end_time",
        ));
    }

    let conflicts = match school_conflicts(&storage, &candidate, &subject).await {
        Ok(conflicts) => conflicts,
        Err(e) => return Ok(internal_error("Failed to detect schedule conflicts", e)),
    };
    let conflicts =
        match apply_conflict_policy(conflicts, AppConfig::get().school.reject_schedule_conflicts) {
            Ok(conflicts) => conflicts,
            Err(response) => return Ok(response),
        };

    match storage.update_schedule_slot(slot_id, update).await {
        Ok(Some(slot)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScheduleSlotMutationResponse { slot, conflicts },
            "Schedule slot updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ScheduleSlotNotFound, "Schedule slot not found")),
        Err(e) => Ok(storage_error("Failed to update schedule slot", e)),
    }
}
