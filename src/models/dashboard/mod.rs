use serde::Serialize;
use ts_rs::TS;

use crate::models::announcements::entities::Announcement;
use crate::models::attendance::entities::AttendanceSummary;
use crate::models::events::entities::CalendarEvent;
use crate::models::grades::entities::GradeSummary;
use crate::models::lesson_plans::entities::LessonPlan;
use crate::models::schedules::responses::ScheduleResponse;
use crate::models::subjects::entities::Subject;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub subjects: Vec<Subject>,
    pub schedule: ScheduleResponse,
    pub attendance: Vec<AttendanceSummary>,
    pub grades: Vec<GradeSummary>,
    pub upcoming_events: Vec<CalendarEvent>,
    pub announcements: Vec<Announcement>,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboard {
    pub subjects: Vec<Subject>,
    pub schedule: ScheduleResponse,
    pub lesson_plans: Vec<LessonPlan>,
    pub upcoming_events: Vec<CalendarEvent>,
    pub announcements: Vec<Announcement>,
    pub unread_notifications: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StaffDashboard {
    pub upcoming_events: Vec<CalendarEvent>,
    pub announcements: Vec<Announcement>,
    pub unread_notifications: i64,
    /// 出勤状况不为 regular 的学生
    pub attendance_alerts: Vec<AttendanceSummary>,
}

// 首页数据，按角色区分
#[derive(Debug, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum DashboardResponse {
    Student(StudentDashboard),
    Teacher(TeacherDashboard),
    Staff(StaffDashboard),
}
