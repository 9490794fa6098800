use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use super::EventService;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    events::{entities::CalendarEvent, requests::EventListQuery, responses::EventListResponse},
};
use crate::services::{bad_request, current_user, internal_error};
use crate::storage::Storage;

/// 未来若干天内的事件，包含今天仍在进行的事件
pub(crate) async fn upcoming_events(
    storage: &Arc<dyn Storage>,
    today: NaiveDate,
    days: i64,
) -> Result<Vec<CalendarEvent>> {
    storage
        .list_events(EventListQuery {
            from: Some(today),
            to: Some(today + Duration::days(days)),
            ..Default::default()
        })
        .await
}

/// 事件是否与学生相关：没有限定科目和班级，或者限定的科目/班级与学生匹配
pub(crate) fn relevant_to_student(
    event: &CalendarEvent,
    course: Option<&str>,
    subject_ids: &[i64],
) -> bool {
    let subject_ok = event.subject_id.is_none_or(|id| subject_ids.contains(&id));
    let course_ok = match (&event.course, course) {
        (None, _) => true,
        (Some(event_course), Some(course)) => event_course.eq_ignore_ascii_case(course),
        (Some(_), None) => false,
    };
    subject_ok && course_ok
}

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
    query: EventListQuery,
) -> ActixResult<HttpResponse> {
    if let Err(response) = current_user(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request);

    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            "from must not be after to",
        ));
    }

    match storage.list_events(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EventListResponse { items },
            "Events retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list events", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::entities::EventKind;

    fn event(subject_id: Option<i64>, course: Option<&str>) -> CalendarEvent {
        let day = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        CalendarEvent {
            id: 1,
            title: "Examen".into(),
            description: None,
            kind: EventKind::Exam,
            subject_id,
            course: course.map(str::to_string),
            starts_on: day,
            ends_on: day,
            created_by: 1,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_school_wide_event_is_relevant() {
        assert!(relevant_to_student(&event(None, None), None, &[]));
    }

    #[test]
    fn test_subject_and_course_filters() {
        assert!(relevant_to_student(&event(Some(3), None), Some("5A"), &[3, 4]));
        assert!(!relevant_to_student(&event(Some(9), None), Some("5A"), &[3, 4]));
        assert!(relevant_to_student(&event(None, Some("5A")), Some("5a"), &[]));
        assert!(!relevant_to_student(&event(None, Some("5A")), Some("4B"), &[]));
        assert!(!relevant_to_student(&event(None, Some("5A")), None, &[]));
    }
}
