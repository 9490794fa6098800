use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    can_manage_subject, current_user, forbidden, internal_error, load_subject, not_found,
};

pub async fn delete_slot(
    service: &ScheduleService,
    request: &HttpRequest,
    slot_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let slot = match storage.get_schedule_slot_by_id(slot_id).await {
        Ok(Some(slot)) => slot,
        Ok(None) => return Ok(not_found(ErrorCode::ScheduleSlotNotFound, "Schedule slot not found")),
        Err(e) => return Ok(internal_error("Failed to load schedule slot", e)),
    };
    let subject = match load_subject(&storage, slot.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can edit its schedule",
        ));
    }

    match storage.delete_schedule_slot(slot.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Schedule slot deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::ScheduleSlotNotFound, "Schedule slot not found")),
        Err(e) => Ok(internal_error("Failed to delete schedule slot", e)),
    }
}
