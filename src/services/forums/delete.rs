use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ForumService;
use super::detail::{is_moderator, load_visible_thread};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, internal_error, not_found};

pub async fn delete_thread(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (thread, subject) = match load_visible_thread(&storage, &user, thread_id).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };
    if thread.author_id != user.id && !is_moderator(&user, subject.as_ref()) {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "Only the author or a moderator can delete the thread",
        ));
    }

    match storage.delete_thread(thread.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Thread deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::ThreadNotFound, "Thread not found")),
        Err(e) => Ok(internal_error("Failed to delete thread", e)),
    }
}
