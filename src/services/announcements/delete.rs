use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;
use super::detail::{ensure_author_or_admin, load_announcement};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn delete_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_id: i64,
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

    match storage.delete_announcement(announcement.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Announcement deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::AnnouncementNotFound,
            "Announcement not found",
        )),
        Err(e) => Ok(internal_error("Failed to delete announcement", e)),
    }
}
