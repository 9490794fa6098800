use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::SubjectAccess;
use crate::models::{ApiResponse, ErrorCode, attendance::requests::UpdateAttendanceRequest};
use crate::services::{
    current_user, forbidden, has_subject_access, internal_error, load_subject, not_found,
};

pub async fn update_record(
    service: &AttendanceService,
    request: &HttpRequest,
    record_id: i64,
    update: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let record = match storage.get_attendance_record_by_id(record_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AttendanceRecordNotFound,
                "Attendance record not found",
            ));
        }
        Err(e) => return Ok(internal_error("Failed to load attendance record", e)),
    };
    let subject = match load_subject(&storage, record.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if !has_subject_access(SubjectAccess::Staff, &user, &subject, false) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "No permission to edit attendance for this subject",
        ));
    }

    match storage.update_attendance_record(record.id, update).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance record updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AttendanceRecordNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(internal_error("Failed to update attendance record", e)),
    }
}
