use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::StudentRepService;
use crate::models::{
    ApiResponse, ErrorCode,
    notifications::entities::NotificationKind,
    student_rep::{
        entities::{Claim, ClaimStatus},
        requests::{ClaimListParams, ClaimListQuery, CreateClaimRequest, RespondClaimRequest},
    },
    users::entities::{User, UserRole},
};
use crate::services::{
    bad_request, current_user, forbidden, internal_error, not_found, notify, storage_error,
};
use crate::storage::Storage;
use crate::utils::validate::{optional_text, required_text};

/// 可以查看和处理所有申诉的角色
fn reviews_claims(role: UserRole) -> bool {
    UserRole::claim_reviewer_roles().contains(&&role)
}

/// 校验状态流转
fn check_transition(current: ClaimStatus, next: ClaimStatus) -> Result<(), String> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(format!("Cannot move claim from {current} to {next}"))
    }
}

async fn load_visible_claim(
    storage: &Arc<dyn Storage>,
    user: &User,
    claim_id: i64,
) -> Result<Claim, HttpResponse> {
    match storage.get_claim_by_id(claim_id).await {
        Ok(Some(claim)) if claim.author_id == user.id || reviews_claims(user.role) => Ok(claim),
        Ok(_) => Err(not_found(ErrorCode::ClaimNotFound, "Claim not found")),
        Err(e) => Err(internal_error("Failed to load claim", e)),
    }
}

pub async fn create_claim(
    service: &StudentRepService,
    request: &HttpRequest,
    mut req: CreateClaimRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if !user.role.is_student() {
        return Ok(forbidden(ErrorCode::Forbidden, "Only students can file claims"));
    }
    let storage = service.get_storage(request);

    req.title = match required_text("title", &req.title, 200) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    req.description = match required_text("description", &req.description, 5_000) {
        Ok(description) => description,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    req.category = optional_text(req.category);

    match storage.create_claim(user.id, req).await {
        Ok(claim) => Ok(HttpResponse::Created().json(ApiResponse::success(claim, "Claim created successfully"))),
        Err(e) => Ok(storage_error("Failed to create claim", e)),
    }
}

pub async fn list_claims(
    service: &StudentRepService,
    request: &HttpRequest,
    query: ClaimListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let list_query = ClaimListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
        author_id: (!reviews_claims(user.role)).then_some(user.id),
    };

    match storage.list_claims_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Claims retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list claims", e)),
    }
}

pub async fn get_claim(
    service: &StudentRepService,
    request: &HttpRequest,
    claim_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match load_visible_claim(&storage, &user, claim_id).await {
        Ok(claim) => Ok(HttpResponse::Ok().json(ApiResponse::success(claim, "Claim retrieved successfully"))),
        Err(response) => Ok(response),
    }
}

pub async fn respond_claim(
    service: &StudentRepService,
    request: &HttpRequest,
    claim_id: i64,
    req: RespondClaimRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if !reviews_claims(user.role) {
        return Ok(forbidden(ErrorCode::Forbidden, "No permission to respond to claims"));
    }
    let storage = service.get_storage(request);

    let claim = match load_visible_claim(&storage, &user, claim_id).await {
        Ok(claim) => claim,
        Err(response) => return Ok(response),
    };
    if let Err(msg) = check_transition(claim.status, req.status) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatusTransition,
            msg,
        )));
    }

    let response = optional_text(req.response);
    match storage
        .respond_claim(claim.id, req.status, response, user.id)
        .await
    {
        Ok(Some(updated)) => {
            info!(
                "Claim {} moved from {} to {} by user {}",
                updated.id, claim.status, updated.status, user.id
            );
            notify(
                &storage,
                vec![updated.author_id],
                NotificationKind::Claim,
                format!("Your claim \"{}\" is now {}", updated.title, updated.status),
                updated.response.clone().unwrap_or_default(),
                Some(format!("/claims/{}", updated.id)),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Claim updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClaimNotFound, "Claim not found")),
        Err(e) => Ok(storage_error("Failed to respond to claim", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_roles() {
        assert!(reviews_claims(UserRole::StudentRep));
        assert!(reviews_claims(UserRole::Preceptor));
        assert!(reviews_claims(UserRole::Admin));
        assert!(!reviews_claims(UserRole::Student));
        assert!(!reviews_claims(UserRole::Teacher));
    }

    #[test]
    fn test_transition_errors_name_both_states() {
        assert!(check_transition(ClaimStatus::Pending, ClaimStatus::InReview).is_ok());
        let err = check_transition(ClaimStatus::Resolved, ClaimStatus::InReview).unwrap_err();
        assert!(err.contains("resolved"));
        assert!(err.contains("in_review"));
    }
}
