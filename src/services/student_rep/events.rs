use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::StudentRepService;
use crate::models::{
    ApiResponse, ErrorCode,
    student_rep::{
        entities::RepEvent,
        requests::{CreateRepEventRequest, RepEventListParams, UpdateRepEventRequest},
    },
};
use crate::services::{bad_request, current_user, internal_error, not_found, storage_error};
use crate::storage::Storage;
use crate::utils::validate::{optional_text, required_text};

pub(crate) async fn load_rep_event(
    storage: &Arc<dyn Storage>,
    event_id: i64,
) -> Result<RepEvent, HttpResponse> {
    match storage.get_rep_event_by_id(event_id).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(not_found(ErrorCode::RepEventNotFound, "Event not found")),
        Err(e) => Err(internal_error("Failed to load event", e)),
    }
}

pub async fn list_events(
    service: &StudentRepService,
    request: &HttpRequest,
    query: RepEventListParams,
) -> ActixResult<HttpResponse> {
    if let Err(response) = current_user(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request);

    match storage
        .list_rep_events_with_pagination(query.pagination.page, query.pagination.size, query.status)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Events retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list events", e)),
    }
}

pub async fn create_event(
    service: &StudentRepService,
    request: &HttpRequest,
    mut req: CreateRepEventRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    req.title = match required_text("title", &req.title, 200) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    req.description = optional_text(req.description);
    req.location = optional_text(req.location);
    // 0 或负数视为不限人数
    req.capacity = req.capacity.filter(|c| *c > 0);

    match storage.create_rep_event(user.id, req).await {
        Ok(event) => {
            info!("Student event {} created by user {}", event.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(event, "Event created successfully")))
        }
        Err(e) => Ok(storage_error("Failed to create event", e)),
    }
}

pub async fn get_event(
    service: &StudentRepService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(response) = current_user(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request);

    match load_rep_event(&storage, event_id).await {
        Ok(event) => Ok(HttpResponse::Ok().json(ApiResponse::success(event, "Event retrieved successfully"))),
        Err(response) => Ok(response),
    }
}

pub async fn update_event(
    service: &StudentRepService,
    request: &HttpRequest,
    event_id: i64,
    mut update: UpdateRepEventRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = current_user(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request);

    if let Some(title) = update.title.as_deref() {
        match required_text("title", title, 200) {
            Ok(title) => update.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }

    match storage.update_rep_event(event_id, update).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            event,
            "Event updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::RepEventNotFound, "Event not found")),
        Err(e) => Ok(storage_error("Failed to update event", e)),
    }
}

pub async fn delete_event(
    service: &StudentRepService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(response) = current_user(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request);

    match storage.delete_rep_event(event_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Event deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::RepEventNotFound, "Event not found")),
        Err(e) => Ok(internal_error("Failed to delete event", e)),
    }
}
