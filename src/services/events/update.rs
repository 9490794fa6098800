use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::detail::{ensure_can_modify, load_event};
use super::{EventService, check_date_range};
use crate::models::{ApiResponse, ErrorCode, events::requests::UpdateEventRequest};
use crate::services::{bad_request, current_user, not_found, storage_error};
use crate::utils::validate::required_text;

pub async fn update_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    mut update: UpdateEventRequest,
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

    if let Some(title) = update.title.as_deref() {
        match required_text("title", title, 200) {
            Ok(title) => update.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }

    // 与现有日期合并后再校验
    let starts_on = update.starts_on.unwrap_or(event.starts_on);
    let ends_on = update.ends_on.unwrap_or(event.ends_on);
    if let Err(msg) = check_date_range(starts_on, ends_on) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    match storage.update_event(event.id, update).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            event,
            "Event updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_error("Failed to update event", e)),
    }
}
