use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::auth::responses::UserInfoResponse;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_http_url, validate_password_simple};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Some(ref url) = update_data.avatar_url
        && !url.trim().is_empty()
        && let Err(msg) = validate_http_url(url.trim())
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 处理密码（如果提供了新密码）
    let hashed_password = if let Some(ref new_password) = update_data.new_password {
        // 缓存中的用户不含密码哈希，这里需要重新读取
        let stored = match storage.get_user_by_id(current_user.id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "User not found",
                )));
            }
            Err(e) => return Ok(internal_error("Failed to load user", e)),
        };

        let current_ok = update_data
            .current_password
            .as_deref()
            .is_some_and(|password| verify_password(password, &stored.password_hash));
        if !current_ok {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Current password is incorrect",
            )));
        }

        if let Err(msg) = validate_password_simple(new_password) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserPasswordInvalid,
                msg,
            )));
        }

        match hash_password(new_password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(internal_error("Password hashing failed", e)),
        }
    } else {
        None
    };

    // 个人资料只能修改显示名称、头像和密码
    let storage_update = UpdateUserRequest {
        password: hashed_password,
        display_name: update_data.display_name,
        avatar_url: update_data.avatar_url,
        ..Default::default()
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "Profile updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error("Failed to update profile", e)),
    }
}
