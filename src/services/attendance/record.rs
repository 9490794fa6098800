use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::AttendanceService;
use crate::middlewares::SubjectAccess;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{AttendanceEntry, RecordAttendanceRequest},
        responses::RecordAttendanceResponse,
    },
    notifications::entities::NotificationKind,
};
use crate::services::{
    bad_request, current_user, forbidden, has_subject_access, internal_error, load_subject, notify,
};
use crate::utils::validate::optional_text;

/// 校验点名条目：不能为空，同一学生不能重复，且必须已选课
pub(crate) fn validate_entries(
    entries: &[AttendanceEntry],
    enrolled: &HashSet<i64>,
) -> Result<(), String> {
    if entries.is_empty() {
        return Err("entries must not be empty".to_string());
    }
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.student_id) {
            return Err(format!("Student {} appears more than once", entry.student_id));
        }
        if !enrolled.contains(&entry.student_id) {
            return Err(format!(
                "Student {} is not enrolled in this subject",
                entry.student_id
            ));
        }
    }
    Ok(())
}

/// 缺勤或迟到的学生会收到通知
pub(crate) fn students_to_notify(records: &[AttendanceRecord]) -> Vec<i64> {
    records
        .iter()
        .filter(|r| matches!(r.status, AttendanceStatus::Absent | AttendanceStatus::Late))
        .map(|r| r.student_id)
        .collect()
}

pub async fn record_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mut req: RecordAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, req.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    // 任课教师、学务人员、管理员可以点名
    if !has_subject_access(SubjectAccess::Staff, &user, &subject, false) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "No permission to take attendance for this subject",
        ));
    }

    let enrolled: HashSet<i64> = match storage.list_subject_students(subject.id).await {
        Ok(students) => students.into_iter().map(|s| s.id).collect(),
        Err(e) => return Ok(internal_error("Failed to load enrolled students", e)),
    };
    if let Err(msg) = validate_entries(&req.entries, &enrolled) {
        let code = if msg.contains("not enrolled") {
            ErrorCode::StudentNotEnrolled
        } else {
            ErrorCode::ValidationFailed
        };
        return Ok(bad_request(code, msg));
    }
    for entry in &mut req.entries {
        entry.note = optional_text(entry.note.take());
    }

    let records = match storage
        .upsert_attendance(subject.id, req.date, user.id, &req.entries)
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(internal_error("Failed to record attendance", e)),
    };

    tracing::info!(
        "Attendance for subject {} on {} recorded by {} ({} entries)",
        subject.id,
        req.date,
        user.id,
        records.len()
    );

    notify(
        &storage,
        students_to_notify(&records),
        NotificationKind::Attendance,
        format!("Attendance: {}", subject.name),
        format!("Your attendance for {} on {} was recorded", subject.name, req.date),
        Some(format!("/attendance?subject_id={}", subject.id)),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RecordAttendanceResponse {
            subject_id: subject.id,
            items: records,
        },
        "Attendance recorded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: i64) -> AttendanceEntry {
        AttendanceEntry {
            student_id,
            status: AttendanceStatus::Present,
            note: None,
        }
    }

    #[test]
    fn test_validate_entries() {
        let enrolled: HashSet<i64> = [1, 2, 3].into_iter().collect();
        assert!(validate_entries(&[entry(1), entry(2)], &enrolled).is_ok());
        assert!(validate_entries(&[], &enrolled).is_err());
        assert!(
            validate_entries(&[entry(1), entry(1)], &enrolled)
                .unwrap_err()
                .contains("more than once")
        );
        assert!(
            validate_entries(&[entry(9)], &enrolled)
                .unwrap_err()
                .contains("not enrolled")
        );
    }
}
