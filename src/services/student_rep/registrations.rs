use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::collections::HashMap;

use super::StudentRepService;
use super::events::load_rep_event;
use crate::models::{
    ApiResponse, ErrorCode,
    student_rep::{
        entities::RegistrationOutcome,
        responses::{RegistrationEntry, RegistrationListResponse},
    },
    users::entities::UserBrief,
};
use crate::services::{current_user, forbidden, internal_error, not_found};

/// 报名结果对应的状态码与错误码
fn outcome_status(outcome: &RegistrationOutcome) -> (StatusCode, ErrorCode, &'static str) {
    match outcome {
        RegistrationOutcome::Registered(_) => (
            StatusCode::CREATED,
            ErrorCode::Success,
            "Registered successfully",
        ),
        RegistrationOutcome::EventNotFound => (
            StatusCode::NOT_FOUND,
            ErrorCode::RepEventNotFound,
            "Event not found",
        ),
        RegistrationOutcome::NotOpen => (
            StatusCode::CONFLICT,
            ErrorCode::RepEventClosed,
            "Event is not open for registration",
        ),
        RegistrationOutcome::Full => (StatusCode::CONFLICT, ErrorCode::RepEventFull, "Event is full"),
        RegistrationOutcome::AlreadyRegistered => (
            StatusCode::CONFLICT,
            ErrorCode::AlreadyRegistered,
            "Already registered for this event",
        ),
    }
}

pub async fn register(
    service: &StudentRepService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if !user.role.is_student() {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "Only students can register for events",
        ));
    }
    let storage = service.get_storage(request);

    let outcome = match storage.register_for_rep_event(event_id, user.id).await {
        Ok(outcome) => outcome,
        Err(e) => return Ok(internal_error("Failed to register for event", e)),
    };

    let (status, code, msg) = outcome_status(&outcome);
    match outcome {
        RegistrationOutcome::Registered(registration) => {
            Ok(HttpResponse::build(status).json(ApiResponse::success(registration, msg)))
        }
        _ => Ok(HttpResponse::build(status).json(ApiResponse::error_empty(code, msg))),
    }
}

pub async fn unregister(
    service: &StudentRepService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.unregister_from_rep_event(event_id, user.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Unregistered successfully"))),
        Ok(false) => Ok(not_found(
            ErrorCode::NotFound,
            "Not registered for this event",
        )),
        Err(e) => Ok(internal_error("Failed to unregister from event", e)),
    }
}

pub async fn list_registrations(
    service: &StudentRepService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(response) = current_user(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request);

    let event = match load_rep_event(&storage, event_id).await {
        Ok(event) => event,
        Err(response) => return Ok(response),
    };
    let registrations = match storage.list_rep_event_registrations(event.id).await {
        Ok(registrations) => registrations,
        Err(e) => return Ok(internal_error("Failed to list registrations", e)),
    };

    let student_ids: Vec<i64> = registrations.iter().map(|r| r.student_id).collect();
    let students: HashMap<i64, UserBrief> = match storage.get_users_by_ids(&student_ids).await {
        Ok(users) => users.iter().map(|u| (u.id, UserBrief::from(u))).collect(),
        Err(e) => return Ok(internal_error("Failed to load students", e)),
    };

    let items = registrations
        .into_iter()
        .map(|registration| RegistrationEntry {
            student: students.get(&registration.student_id).cloned(),
            registration,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RegistrationListResponse {
            event_id: event.id,
            items,
        },
        "Registrations retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_map_to_conflict() {
        for (outcome, code) in [
            (RegistrationOutcome::NotOpen, ErrorCode::RepEventClosed),
            (RegistrationOutcome::Full, ErrorCode::RepEventFull),
            (RegistrationOutcome::AlreadyRegistered, ErrorCode::AlreadyRegistered),
        ] {
            let (status, actual, _) = outcome_status(&outcome);
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(actual, code);
        }
    }

    #[test]
    fn test_missing_event_is_not_found() {
        let (status, code, _) = outcome_status(&RegistrationOutcome::EventNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, ErrorCode::RepEventNotFound);
    }
}
