use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ForumService;
use super::detail::{is_moderator, load_visible_thread};
use crate::models::{
    ApiResponse, ErrorCode,
    forums::{entities::ForumThread, requests::UpdateThreadRequest},
    users::entities::User,
};
use crate::services::{bad_request, current_user, forbidden, not_found, storage_error};
use crate::utils::validate::required_text;

/// 作者可以修改标题和内容，版主可以置顶和锁定
fn check_thread_update(
    user: &User,
    thread: &ForumThread,
    moderator: bool,
    update: &UpdateThreadRequest,
) -> Result<(), &'static str> {
    let edits_text = update.title.is_some() || update.content.is_some();
    let moderates = update.pinned.is_some() || update.locked.is_some();

    if edits_text && thread.author_id != user.id {
        return Err("Only the author can edit the thread");
    }
    if moderates && !moderator {
        return Err("Only moderators can pin or lock threads");
    }
    Ok(())
}

pub async fn update_thread(
    service: &ForumService,
    request: &HttpRequest,
    thread_id: i64,
    mut update: UpdateThreadRequest,
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

    let moderator = is_moderator(&user, subject.as_ref());
    if let Err(msg) = check_thread_update(&user, &thread, moderator, &update) {
        return Ok(forbidden(ErrorCode::Forbidden, msg));
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

    match storage.update_thread(thread.id, update).await {
        Ok(Some(thread)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            thread,
            "Thread updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ThreadNotFound, "Thread not found")),
        Err(e) => Ok(storage_error("Failed to update thread", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::user;

    fn thread(author_id: i64) -> ForumThread {
        let now = chrono::Utc::now();
        ForumThread {
            id: 1,
            subject_id: None,
            author_id,
            title: "Parcial".into(),
            content: "¿Cuándo es?".into(),
            pinned: false,
            locked: false,
            reply_count: 0,
            created_at: now,
            updated_at: now,
            last_activity_at: now,
        }
    }

    #[test]
    fn test_author_edits_text_only() {
        let author = user(10, UserRole::Student);
        let edit = UpdateThreadRequest {
            title: Some("Nuevo".into()),
            ..Default::default()
        };
        assert!(check_thread_update(&author, &thread(10), false, &edit).is_ok());

        let pin = UpdateThreadRequest {
            pinned: Some(true),
            ..Default::default()
        };
        assert!(check_thread_update(&author, &thread(10), false, &pin).is_err());
    }

    #[test]
    fn test_moderator_cannot_rewrite_others_text() {
        let preceptor = user(2, UserRole::Preceptor);
        let lock = UpdateThreadRequest {
            locked: Some(true),
            ..Default::default()
        };
        assert!(check_thread_update(&preceptor, &thread(10), true, &lock).is_ok());

        let edit = UpdateThreadRequest {
            content: Some("otro".into()),
            locked: Some(true),
            ..Default::default()
        };
        assert!(check_thread_update(&preceptor, &thread(10), true, &edit).is_err());
    }
}
