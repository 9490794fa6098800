use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::MaterialService;
use crate::models::{
    ApiResponse, ErrorCode,
    materials::{
        entities::{Material, normalize_category},
        requests::UpdateMaterialRequest,
    },
    users::entities::User,
};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, internal_error, load_subject,
    not_found, storage_error,
};
use crate::storage::Storage;
use crate::utils::validate::{required_text, validate_http_url};

/// 加载资料并确认当前用户可以管理其所属科目
pub(crate) async fn load_managed_material(
    storage: &Arc<dyn Storage>,
    user: &User,
    material_id: i64,
) -> Result<Material, HttpResponse> {
    let material = match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) => material,
        Ok(None) => return Err(not_found(ErrorCode::MaterialNotFound, "Material not found")),
        Err(e) => return Err(internal_error("Failed to load material", e)),
    };
    let subject = load_subject(storage, material.subject_id).await?;
    if !can_manage_subject(user, &subject) {
        return Err(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can manage materials",
        ));
    }
    Ok(material)
}

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
    mut update: UpdateMaterialRequest,
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

    if let Some(title) = update.title.as_deref() {
        match required_text("title", title, 200) {
            Ok(title) => update.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
        }
    }
    if let Some(url) = update.url.as_deref() {
        let url = url.trim().to_string();
        if let Err(msg) = validate_http_url(&url) {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
        update.url = Some(url);
    }
    if update.category.is_some() {
        update.category = Some(normalize_category(update.category.as_deref()));
    }

    match storage.update_material(material.id, update).await {
        Ok(Some(material)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            material,
            "Material updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::MaterialNotFound, "Material not found")),
        Err(e) => Ok(storage_error("Failed to update material", e)),
    }
}
