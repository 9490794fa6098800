use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ForumService;
use crate::middlewares::SubjectAccess;
use crate::models::{ApiResponse, ErrorCode, forums::requests::CreateThreadRequest};
use crate::services::{
    bad_request, check_subject_access, current_user, load_subject, storage_error,
};
use crate::utils::validate::required_text;

pub async fn create_thread(
    service: &ForumService,
    request: &HttpRequest,
    mut req: CreateThreadRequest,
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
    req.content = match required_text("content", &req.content, 20_000) {
        Ok(content) => content,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    if let Some(subject_id) = req.subject_id {
        let subject = match load_subject(&storage, subject_id).await {
            Ok(subject) => subject,
            Err(response) => return Ok(response),
        };
        if let Err(response) =
            check_subject_access(&storage, SubjectAccess::Member, &user, &subject).await
        {
            return Ok(response);
        }
    }

    match storage.create_thread(user.id, req).await {
        Ok(thread) => Ok(HttpResponse::Created().json(ApiResponse::success(
            thread,
            "Thread created successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to create thread", e)),
    }
}
