use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;
use super::detail::{audience_allowed, ensure_author_or_admin, load_announcement};
use crate::models::{ApiResponse, ErrorCode, announcements::requests::UpdateAnnouncementRequest};
use crate::services::{bad_request, current_user, forbidden, not_found, storage_error};
use crate::utils::validate::required_text;

pub async fn update_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_id: i64,
    mut update: UpdateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let announcement = match load_announcement(&storage, announcement_id).await {
        Ok(announcement) => announcement,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_author_or_admin(&user, &announcement) {
        return Ok(response);
    }
    if let Some(audience) = update.audience
        && !audience_allowed(user.role, audience)
    {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "Student representatives can only address students or everyone",
        ));
    }

    if let Some(title) = update.title.as_deref() {
        match required_text("title", title, 200) {
            Ok(title) => update.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }
    if let Some(content) = update.content.as_deref() {
        match required_text("content", content, 20_000) {
            Ok(content) => update.content = Some(content),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }

    match storage.update_announcement(announcement.id, update).await {
        Ok(Some(announcement)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            announcement,
            "Announcement updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AnnouncementNotFound,
            "Announcement not found",
        )),
        Err(e) => Ok(storage_error("Failed to update announcement", e)),
    }
}
