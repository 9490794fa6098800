use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::EventService;
use crate::models::{ApiResponse, ErrorCode, events::entities::CalendarEvent, users::entities::User};
use crate::services::{current_user, forbidden, internal_error, not_found};
use crate::storage::Storage;

pub(crate) async fn load_event(
    storage: &Arc<dyn Storage>,
    event_id: i64,
) -> Result<CalendarEvent, HttpResponse> {
    match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Err(internal_error("Failed to load event", e)),
    }
}

/// 教师只能修改自己创建的事件，学务人员和管理员不受限
pub(crate) fn ensure_can_modify(user: &User, event: &CalendarEvent) -> Result<(), HttpResponse> {
    if user.role.is_school_staff() || event.created_by == user.id {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::Forbidden,
            "Only the creator or school staff can modify this event",
        ))
    }
}

pub async fn get_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(response) = current_user(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request);

    match load_event(&storage, event_id).await {
        Ok(event) => Ok(HttpResponse::Ok().json(ApiResponse::success(event, "Event retrieved successfully"))),
        Err(response) => Ok(response),
    }
}
