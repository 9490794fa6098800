use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse,
    subjects::requests::{SubjectListQuery, SubjectQueryParams},
    users::entities::{User, UserRole},
};
use crate::services::{current_user, internal_error};

/// 根据当前用户角色收窄查询范围
pub(crate) fn scope_subject_query(user: &User, query: SubjectQueryParams) -> SubjectListQuery {
    let mut list_query = SubjectListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course: query.course,
        teacher_id: query.teacher_id,
        student_id: None,
        search: query.search,
    };

    match user.role {
        UserRole::Teacher => list_query.teacher_id = Some(user.id),
        UserRole::Student | UserRole::StudentRep => {
            list_query.student_id = Some(user.id);
            list_query.teacher_id = None;
        }
        UserRole::Preceptor | UserRole::Admin => {}
    }

    list_query
}

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let list_query = scope_subject_query(&user, query);

    match storage.list_subjects_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve subject list", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::services::test_support::user;

    fn params(teacher_id: Option<i64>) -> SubjectQueryParams {
        SubjectQueryParams {
            pagination: PaginationQuery { page: 1, size: 20 },
            course: Some("5A".into()),
            teacher_id,
            search: None,
        }
    }

    #[test]
    fn test_teacher_only_sees_own_subjects() {
        let query = scope_subject_query(&user(3, UserRole::Teacher), params(Some(99)));
        assert_eq!(query.teacher_id, Some(3));
        assert_eq!(query.student_id, None);
    }

    #[test]
    fn test_student_sees_enrolled_subjects() {
        let query = scope_subject_query(&user(5, UserRole::StudentRep), params(Some(99)));
        assert_eq!(query.student_id, Some(5));
        assert_eq!(query.teacher_id, None);
    }

    #[test]
    fn test_staff_filters_are_kept() {
        let query = scope_subject_query(&user(1, UserRole::Preceptor), params(Some(99)));
        assert_eq!(query.teacher_id, Some(99));
        assert_eq!(query.course.as_deref(), Some("5A"));
    }
}
