use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ForumService;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    forums::requests::{ThreadListParams, ThreadListQuery},
    users::entities::{User, UserRole},
};
use crate::services::{attendance::list::teacher_subject_ids, current_user, internal_error};
use crate::storage::Storage;

/// 用户可见的科目讨论区，`None` 表示全部可见
pub(crate) async fn visible_subject_ids(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<Option<Vec<i64>>> {
    match user.role {
        UserRole::Admin | UserRole::Preceptor => Ok(None),
        UserRole::Teacher => Ok(Some(teacher_subject_ids(storage, user.id).await?)),
        UserRole::Student | UserRole::StudentRep => {
            Ok(Some(storage.list_enrolled_subject_ids(user.id).await?))
        }
    }
}

pub async fn list_threads(
    service: &ForumService,
    request: &HttpRequest,
    query: ThreadListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let visible = match visible_subject_ids(&storage, &user).await {
        Ok(visible) => visible,
        Err(e) => return Ok(internal_error("Failed to resolve visible subjects", e)),
    };

    let list_query = ThreadListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        subject_id: query.subject_id,
        visible_subject_ids: visible,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    match storage.list_threads_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Threads retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list threads", e)),
    }
}
