use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use super::detail::{ensure_can_modify, load_event};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn delete_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let event = match load_event(&storage, event_id).await {
        Ok(event) => event,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_can_modify(&user, &event) {
        return Ok(response);
    }

    match storage.delete_event(event.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Event deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(internal_error("Failed to delete event", e)),
    }
}
