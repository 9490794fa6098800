use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use super::update::load_managed_material;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let material = match load_managed_material(&storage, &user, material_id).await {
        Ok(material) => material,
        Err(response) => return Ok(response),
    };

    match storage.delete_material(material.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Material deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::MaterialNotFound, "Material not found")),
        Err(e) => Ok(internal_error("Failed to delete material", e)),
    }
}
