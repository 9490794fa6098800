use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EventService, check_date_range};
use crate::models::{ApiResponse, ErrorCode, events::requests::CreateEventRequest};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, load_subject, storage_error,
};
use crate::utils::validate::{optional_text, required_text};

pub async fn create_event(
    service: &EventService,
    request: &HttpRequest,
    mut req: CreateEventRequest,
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
    if let Err(msg) = check_date_range(req.starts_on, req.ends_on.unwrap_or(req.starts_on)) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    // 绑定科目时，教师只能为自己任教的科目创建事件
    if let Some(subject_id) = req.subject_id {
        let subject = match load_subject(&storage, subject_id).await {
            Ok(subject) => subject,
            Err(response) => return Ok(response),
        };
        if !user.role.is_school_staff() && !can_manage_subject(&user, &subject) {
            return Ok(forbidden(
                ErrorCode::SubjectPermissionDenied,
                "No permission for this subject",
            ));
        }
    }

    match storage.create_event(user.id, req).await {
        Ok(event) => {
            info!("Event {} ({}) created by user {}", event.id, event.kind, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(event, "Event created successfully")))
        }
        Err(e) => Ok(storage_error("Failed to create event", e)),
    }
}
