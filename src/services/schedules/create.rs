use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::ScheduleService;
use super::conflicts::{PlacedSlot, conflicts_with};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    schedules::{
        entities::{ScheduleConflict, ScheduleSlot},
        requests::CreateScheduleSlotRequest,
        responses::ScheduleSlotMutationResponse,
    },
    subjects::{entities::Subject, requests::SubjectListQuery},
};
use crate::services::{
    bad_request, can_manage_subject, current_user, forbidden, internal_error, load_subject,
    storage_error,
};
use crate::storage::Storage;

/// 候选时段与全校已有时段的冲突
pub(crate) async fn school_conflicts(
    storage: &Arc<dyn Storage>,
    candidate: &ScheduleSlot,
    subject: &Subject,
) -> Result<Vec<ScheduleConflict>> {
    let subjects = storage.list_all_subjects(SubjectListQuery::default()).await?;
    let slots = storage.list_schedule_slots(None).await?;
    let by_id: HashMap<i64, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();

    let existing: Vec<PlacedSlot<'_>> = slots
        .iter()
        .filter_map(|slot| {
            by_id
                .get(&slot.subject_id)
                .map(|subject| PlacedSlot { slot, subject })
        })
        .collect();

    Ok(conflicts_with(
        PlacedSlot {
            slot: candidate,
            subject,
        },
        &existing,
    ))
}

/// 开启 reject_schedule_conflicts 时，冲突返回 409 并附带冲突列表
fn conflict_rejection(conflicts: Vec<ScheduleConflict>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::ScheduleConflict,
        conflicts,
        "The schedule slot conflicts with existing slots",
    ))
}

/// 按配置处理冲突：拒绝时返回 409 响应，否则原样交回冲突列表作为警告
pub(crate) fn apply_conflict_policy(
    conflicts: Vec<ScheduleConflict>,
    reject: bool,
) -> std::result::Result<Vec<ScheduleConflict>, HttpResponse> {
    if reject && !conflicts.is_empty() {
        return Err(conflict_rejection(conflicts));
    }
    Ok(conflicts)
}

pub async fn create_slot(
    service: &ScheduleService,
    request: &HttpRequest,
    mut req: CreateScheduleSlotRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    if req.start_time >= req.end_time {
        return Ok(bad_request(
            ErrorCode::ScheduleInvalidTime,
            "start_time must be earlier than end_time",
        ));
    }
    req.classroom = crate::utils::validate::optional_text(req.classroom);

    let subject = match load_subject(&storage, req.subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if !can_manage_subject(&user, &subject) {
        return Ok(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "Only the subject teacher or an administrator can edit its schedule",
        ));
    }

    // 尚未入库的候选时段，ID 暂记为 0
    let now = chrono::Utc::now();
    let candidate = ScheduleSlot {
        id: 0,
        subject_id: subject.id,
        day_of_week: req.day_of_week,
        start_time: req.start_time,
        end_time: req.end_time,
        classroom: req.classroom.clone(),
        created_at: now,
        updated_at: now,
    };
    let conflicts = match school_conflicts(&storage, &candidate, &subject).await {
        Ok(conflicts) => conflicts,
        Err(e) => return Ok(internal_error("Failed to detect schedule conflicts", e)),
    };
    let mut conflicts =
        match apply_conflict_policy(conflicts, AppConfig::get().school.reject_schedule_conflicts) {
            Ok(conflicts) => conflicts,
            Err(response) => return Ok(response),
        };

    match storage.create_schedule_slot(req).await {
        Ok(slot) => {
            for conflict in &mut conflicts {
                conflict.first_slot_id = slot.id;
            }
            if !conflicts.is_empty() {
                tracing::warn!(
                    "Schedule slot {} created with {} conflicts",
                    slot.id,
                    conflicts.len()
                );
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ScheduleSlotMutationResponse { slot, conflicts },
                "Schedule slot created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to create schedule slot", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedules::entities::{ConflictReason, Weekday};
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::test_support::{
        create_subject, create_user, memory_storage,
    };
    use actix_web::http::StatusCode;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn candidate(subject_id: i64, start: NaiveTime, end: NaiveTime) -> ScheduleSlot {
        let now = chrono::Utc::now();
        ScheduleSlot {
            id: 0,
            subject_id,
            day_of_week: Weekday::Monday,
            start_time: start,
            end_time: end,
            classroom: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_school_conflicts_same_course_overlap_and_touching() {
        let db = memory_storage().await;
        let garcia = create_user(&db, "garcia", UserRole::Teacher, None).await;
        let lopez = create_user(&db, "lopez", UserRole::Teacher, None).await;
        let math = create_subject(&db, garcia.id, "Matemática", "5A").await;
        let history = create_subject(&db, lopez.id, "Historia", "5A").await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let existing = storage
            .create_schedule_slot(CreateScheduleSlotRequest {
                subject_id: math.id,
                day_of_week: Weekday::Monday,
                start_time: at(8, 0),
                end_time: at(9, 0),
                classroom: None,
            })
            .await
            .unwrap();

        let overlapping = candidate(history.id, at(8, 30), at(9, 30));
        let conflicts = school_conflicts(&storage, &overlapping, &history)
            .await
            .unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].reason, ConflictReason::SameCourse);
        assert_eq!(conflicts[0].second_slot_id, existing.id);
        assert_eq!(conflicts[0].day_of_week, Weekday::Monday);

        // 前一节结束即下一节开始，不算重叠
        let touching = candidate(history.id, at(9, 0), at(10, 0));
        let conflicts = school_conflicts(&storage, &touching, &history)
            .await
            .unwrap();
        assert!(conflicts.is_empty());
    }

    fn sample_conflict() -> ScheduleConflict {
        ScheduleConflict {
            first_slot_id: 0,
            second_slot_id: 7,
            day_of_week: Weekday::Monday,
            reason: ConflictReason::SameCourse,
        }
    }

    #[actix_web::test]
    async fn test_conflicts_rejected_with_409_when_configured() {
        let response = match apply_conflict_policy(vec![sample_conflict()], true) {
            Err(response) => response,
            Ok(_) => panic!("conflicts should be rejected"),
        };
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::ScheduleConflict as i32);
        assert_eq!(json["data"].as_array().map(|a| a.len()), Some(1));
        assert_eq!(json["data"][0]["reason"], "same_course");
    }

    #[test]
    fn test_conflicts_kept_as_warnings_by_default() {
        let conflicts = apply_conflict_policy(vec![sample_conflict()], false).unwrap();
        assert_eq!(conflicts, vec![sample_conflict()]);

        // 没有冲突时无论配置都放行
        assert!(apply_conflict_policy(Vec::new(), true).unwrap().is_empty());
    }
}
