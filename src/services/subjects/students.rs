use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::SubjectService;
use crate::middlewares::SubjectAccess;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{requests::EnrollStudentsRequest, responses::SubjectStudentsResponse},
    users::entities::{User, UserBrief},
};
use crate::services::{
    bad_request, can_manage_subject, check_subject_access, current_user, forbidden,
    internal_error, scoped_subject,
};

/// 找出不存在或不是学生的 ID
pub(crate) fn invalid_student_ids(requested: &[i64], found: &[User]) -> Vec<i64> {
    let students: HashSet<i64> = found
        .iter()
        .filter(|user| user.role.is_student())
        .map(|user| user.id)
        .collect();
    let mut invalid: Vec<i64> = requested
        .iter()
        .copied()
        .filter(|id| !students.contains(id))
        .collect();
    invalid.sort_unstable();
    invalid.dedup();
    invalid
}

pub async fn list_students(
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
        check_subject_access(&storage, SubjectAccess::Staff, &user, &subject).await
    {
        return Ok(response);
    }

    match storage.list_subject_students(subject.id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectStudentsResponse {
                subject_id: subject.id,
                items: students.iter().map(UserBrief::from).collect(),
            },
            "Enrolled students retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list enrolled students", e)),
    }
}

pub async fn enroll_students(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    req: EnrollStudentsRequest,
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
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can enrol students",
        ));
    }

    if req.student_ids.is_empty() {
        return Ok(bad_request(ErrorCode::ValidationFailed, "student_ids must not be empty"));
    }

    let found = match storage.get_users_by_ids(&req.student_ids).await {
        Ok(users) => users,
        Err(e) => return Ok(internal_error("Failed to load students", e)),
    };
    let invalid = invalid_student_ids(&req.student_ids, &found);
    if !invalid.is_empty() {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            format!("Not students: {invalid:?}"),
        ));
    }

    match storage.enroll_students(subject.id, &req.student_ids).await {
        Ok(response) => {
            tracing::info!(
                "Enrolled {} students in subject {} ({} skipped)",
                response.enrolled.len(),
                subject.id,
                response.skipped.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Students enrolled successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to enrol students", e)),
    }
}

pub async fn unenroll_student(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    student_id: i64,
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
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can unenrol students",
        ));
    }

    match storage.unenroll_student(subject.id, student_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Student unenrolled successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "Student is not enrolled in this subject",
        ))),
        Err(e) => Ok(internal_error("Failed to unenrol student", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::user;

    #[test]
    fn test_invalid_student_ids() {
        let found = vec![
            user(1, UserRole::Student),
            user(2, UserRole::StudentRep),
            user(3, UserRole::Teacher),
        ];
        assert_eq!(invalid_student_ids(&[1, 2, 3, 4, 4], &found), vec![3, 4]);
        assert!(invalid_student_ids(&[2, 1], &found).is_empty());
    }
}
