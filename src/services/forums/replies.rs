use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ForumService;
use super::detail::{is_moderator, load_visible_thread};
use crate::models::{
    ApiResponse, ErrorCode, forums::requests::CreateReplyRequest,
    notifications::entities::NotificationKind,
};
use crate::services::{
    bad_request, current_user, forbidden, internal_error, not_found, notify, storage_error,
};
use crate::utils::validate::required_text;

pub async fn create_reply(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
    req: CreateReplyRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let content = match required_text("content", &req.content, 20_000) {
        Ok(content) => content,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    let (thread, _) = match load_visible_thread(&storage, &user, thread_id).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };
    if thread.locked {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ThreadLocked,
            "Thread is locked",
        )));
    }

    match storage.create_reply(thread.id, user.id, content).await {
        Ok(reply) => {
            if thread.author_id != user.id {
                notify(
                    &storage,
                    vec![thread.author_id],
                    NotificationKind::Forum,
                    format!("New reply in \"{}\"", thread.title),
                    format!("{} replied to your thread", user.username),
                    Some(format!("/forums/threads/{}", thread.id)),
                )
                .await;
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(reply, "Reply created successfully")))
        }
        Err(e) => Ok(storage_error("Failed to create reply", e)),
    }
}

pub async fn delete_reply(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
    reply_id: i64,
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

    let reply = match storage.get_reply_by_id(reply_id).await {
        Ok(Some(reply)) if reply.thread_id == thread.id => reply,
        Ok(_) => return Ok(not_found(ErrorCode::ReplyNotFound, "Reply not found")),
        Err(e) => return Ok(internal_error("Failed to load reply", e)),
    };
    if reply.author_id != user.id && !is_moderator(&user, subject.as_ref()) {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "Only the author or a moderator can delete the reply",
        ));
    }

    match storage.delete_reply(reply.id).await {
        Ok(true) => {
            info!("Reply {} in thread {} deleted by user {}", reply.id, thread.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Reply deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ReplyNotFound, "Reply not found")),
        Err(e) => Ok(internal_error("Failed to delete reply", e)),
    }
}
