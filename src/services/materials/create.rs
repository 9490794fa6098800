use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::{
    ApiResponse, ErrorCode,
    materials::{entities::normalize_category, requests::CreateMaterialRequest},
};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, load_subject, storage_error,
};
use crate::utils::validate::{optional_text, required_text, validate_http_url};

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    mut req: CreateMaterialRequest,
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
    req.url = req.url.trim().to_string();
    if let Err(msg) = validate_http_url(&req.url) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    req.description = optional_text(req.description);
    req.category = Some(normalize_category(req.category.as_deref()));

    let subject = match load_subject(&storage, req.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can publish materials",
        ));
    }

    match storage.create_material(user.id, req).await {
        Ok(material) => Ok(HttpResponse::Created().json(ApiResponse::success(
            material,
            "Material created successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to create material", e)),
    }
}
