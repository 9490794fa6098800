use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::debug;

use super::DashboardService;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    dashboard::{DashboardResponse, StaffDashboard, StudentDashboard, TeacherDashboard},
    events::entities::CalendarEvent,
    lesson_plans::requests::LessonPlanListQuery,
    schedules::requests::ScheduleQueryParams,
    subjects::requests::SubjectListQuery,
    users::entities::{User, UserRole},
};
use crate::services::{
    announcements::list::latest_visible,
    attendance::report::{flagged_attendance, student_summaries},
    current_user,
    events::list::{relevant_to_student, upcoming_events},
    grades::report::student_grade_summaries,
    internal_error,
    schedules::list::load_timetable,
};
use crate::storage::Storage;

const DASHBOARD_ANNOUNCEMENTS: i64 = 10;
const DASHBOARD_LESSON_PLANS: i64 = 20;

async fn upcoming(storage: &Arc<dyn Storage>) -> Result<Vec<CalendarEvent>> {
    let today = chrono::Utc::now().date_naive();
    upcoming_events(storage, today, AppConfig::get().school.upcoming_events_days).await
}

async fn student_dashboard(storage: &Arc<dyn Storage>, user: &User) -> Result<StudentDashboard> {
    let subjects = storage
        .list_all_subjects(SubjectListQuery {
            student_id: Some(user.id),
            ..Default::default()
        })
        .await?;

    let schedule_query = ScheduleQueryParams::default();
    let (schedule, attendance, grades, events, announcements, unread_notifications) = futures_util::try_join!(
        load_timetable(storage, user, &schedule_query),
        student_summaries(storage, user.id, &subjects),
        student_grade_summaries(storage, user.id, &subjects),
        upcoming(storage),
        latest_visible(storage, user, DASHBOARD_ANNOUNCEMENTS),
        storage.count_unread_notifications(user.id),
    )?;

    let subject_ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
    let upcoming_events = events
        .into_iter()
        .filter(|e| relevant_to_student(e, user.course.as_deref(), &subject_ids))
        .collect();

    Ok(StudentDashboard {
        subjects,
        schedule,
        attendance,
        grades,
        upcoming_events,
        announcements,
        unread_notifications,
    })
}

async fn teacher_dashboard(storage: &Arc<dyn Storage>, user: &User) -> Result<TeacherDashboard> {
    let schedule_query = ScheduleQueryParams::default();
    let (subjects, schedule, lesson_plans, upcoming_events, announcements, unread_notifications) = futures_util::try_join!(
        storage.list_all_subjects(SubjectListQuery {
            teacher_id: Some(user.id),
            ..Default::default()
        }),
        load_timetable(storage, user, &schedule_query),
        storage.list_lesson_plans_with_pagination(LessonPlanListQuery {
            page: Some(1),
            size: Some(DASHBOARD_LESSON_PLANS),
            teacher_id: Some(user.id),
            ..Default::default()
        }),
        upcoming(storage),
        latest_visible(storage, user, DASHBOARD_ANNOUNCEMENTS),
        storage.count_unread_notifications(user.id),
    )?;

    Ok(TeacherDashboard {
        subjects,
        schedule,
        lesson_plans: lesson_plans.items,
        upcoming_events,
        announcements,
        unread_notifications,
    })
}

async fn staff_dashboard(storage: &Arc<dyn Storage>, user: &User) -> Result<StaffDashboard> {
    let (upcoming_events, announcements, unread_notifications, attendance_alerts) = futures_util::try_join!(
        upcoming(storage),
        latest_visible(storage, user, DASHBOARD_ANNOUNCEMENTS),
        storage.count_unread_notifications(user.id),
        flagged_attendance(storage),
    )?;

    Ok(StaffDashboard {
        upcoming_events,
        announcements,
        unread_notifications,
        attendance_alerts,
    })
}

/// 按角色加载首页数据，任一查询失败则整体失败
pub(crate) async fn load_dashboard(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<DashboardResponse> {
    match user.role {
        UserRole::Student | UserRole::StudentRep => student_dashboard(storage, user)
            .await
            .map(DashboardResponse::Student),
        UserRole::Teacher => teacher_dashboard(storage, user)
            .await
            .map(DashboardResponse::Teacher),
        UserRole::Preceptor | UserRole::Admin => staff_dashboard(storage, user)
            .await
            .map(DashboardResponse::Staff),
    }
}

fn dashboard_response(result: Result<DashboardResponse>) -> HttpResponse {
    match result {
        Ok(dashboard) => HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard loaded successfully",
        )),
        Err(e) => internal_error("Failed to load dashboard", e),
    }
}

pub async fn get_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let result = load_dashboard(&storage, &user).await;
    if result.is_ok() {
        debug!("Dashboard loaded for user {} ({})", user.id, user.role);
    }
    Ok(dashboard_response(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchoolSystemError;
    use crate::models::ErrorCode;
    use crate::models::attendance::{
        entities::{AttendanceStanding, AttendanceStatus},
        requests::AttendanceEntry,
    };
    use crate::models::lesson_plans::requests::CreateLessonPlanRequest;
    use crate::models::schedules::{entities::Weekday, requests::CreateScheduleSlotRequest};
    use crate::storage::sea_orm_storage::test_support::{
        create_subject, create_user, memory_storage,
    };
    use actix_web::http::StatusCode;
    use chrono::{NaiveDate, NaiveTime};

    fn entry(student_id: i64, status: AttendanceStatus) -> AttendanceEntry {
        AttendanceEntry {
            student_id,
            status,
            note: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_payload_per_role() {
        let db = memory_storage().await;
        let teacher = create_user(&db, "profe01", UserRole::Teacher, None).await;
        let regular = create_user(&db, "alumno01", UserRole::Student, Some("5A")).await;
        let absent = create_user(&db, "alumno02", UserRole::Student, Some("5A")).await;
        let preceptor = create_user(&db, "precep01", UserRole::Preceptor, None).await;
        let subject = create_subject(&db, teacher.id, "Matemática", "5A").await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        storage
            .enroll_students(subject.id, &[regular.id, absent.id])
            .await
            .unwrap();
        storage
            .create_schedule_slot(CreateScheduleSlotRequest {
                subject_id: subject.id,
                day_of_week: Weekday::Monday,
                start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                classroom: Some("Aula 3".into()),
            })
            .await
            .unwrap();
        for d in [3, 4, 5, 6] {
            let status = if d == 3 {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            };
            storage
                .upsert_attendance(
                    subject.id,
                    day(d),
                    teacher.id,
                    &[entry(regular.id, AttendanceStatus::Present), entry(absent.id, status)],
                )
                .await
                .unwrap();
        }
        storage
            .create_lesson_plan(
                teacher.id,
                CreateLessonPlanRequest {
                    subject_id: subject.id,
                    title: "Funciones lineales".into(),
                    objectives: None,
                    content: "Unidad 2".into(),
                    starts_on: day(3),
                    ends_on: day(14),
                },
            )
            .await
            .unwrap();

        match load_dashboard(&storage, &regular).await.unwrap() {
            DashboardResponse::Student(d) => {
                assert_eq!(d.subjects.len(), 1);
                assert_eq!(d.schedule.items.len(), 1);
                assert_eq!(d.attendance.len(), 1);
                assert_eq!(d.attendance[0].attendance_percentage, 100.0);
                assert_eq!(d.unread_notifications, 0);
            }
            other => panic!("expected student dashboard, got {other:?}"),
        }

        match load_dashboard(&storage, &teacher).await.unwrap() {
            DashboardResponse::Teacher(d) => {
                assert_eq!(d.subjects.len(), 1);
                assert_eq!(d.schedule.items.len(), 1);
                assert_eq!(d.lesson_plans.len(), 1);
            }
            other => panic!("expected teacher dashboard, got {other:?}"),
        }

        match load_dashboard(&storage, &preceptor).await.unwrap() {
            DashboardResponse::Staff(d) => {
                // 全勤的学生不出现在预警列表中
                let flagged: Vec<i64> = d.attendance_alerts.iter().map(|s| s.student_id).collect();
                assert_eq!(flagged, vec![absent.id]);
                assert!(
                    d.attendance_alerts
                        .iter()
                        .all(|s| s.standing != AttendanceStanding::Regular)
                );
            }
            other => panic!("expected staff dashboard, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn test_failed_load_is_internal_error_with_message() {
        let response =
            dashboard_response(Err(SchoolSystemError::database_operation("connection reset")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::InternalServerError as i32);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("connection reset")
        );
    }
}
