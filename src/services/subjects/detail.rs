use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::middlewares::SubjectAccess;
use crate::models::ApiResponse;
use crate::services::{check_subject_access, current_user, scoped_subject};

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let subject = match scoped_subject(&storage, request, subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if let Err(response) =
        check_subject_access(&storage, SubjectAccess::Member, &user, &subject).await
    {
        return Ok(response);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        subject,
        "Subject retrieved successfully",
    )))
}
