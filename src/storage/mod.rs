use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceEntry, AttendanceListQuery, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
    events::{
        entities::CalendarEvent,
        requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
    },
    forums::{
        entities::{ForumReply, ForumThread},
        requests::{CreateThreadRequest, ThreadListQuery, UpdateThreadRequest},
        responses::ThreadListResponse,
    },
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
    lesson_plans::{
        entities::{LessonPlan, LessonPlanStatus},
        requests::{CreateLessonPlanRequest, LessonPlanListQuery, UpdateLessonPlanRequest},
        responses::LessonPlanListResponse,
    },
    materials::{
        entities::Material,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
    },
    notifications::{
        entities::Notification, requests::CreateNotificationRequest,
        responses::NotificationListResponse,
    },
    schedules::{
        entities::ScheduleSlot,
        requests::{CreateScheduleSlotRequest, UpdateScheduleSlotRequest},
    },
    student_rep::{
        entities::{Claim, ClaimStatus, RegistrationOutcome, RepEvent, RepEventRegistration, RepEventStatus},
        requests::{ClaimListQuery, CreateClaimRequest, CreateRepEventRequest, UpdateRepEventRequest},
        responses::{ClaimListResponse, RepEventListResponse},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::{EnrollStudentsResponse, SubjectListResponse},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息（password 字段为已哈希的密码）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 科目与选课
    async fn create_subject(&self, teacher_id: i64, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_name_and_course(
        &self,
        name: &str,
        course: &str,
    ) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    // 不分页，忽略 page/size
    async fn list_all_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>>;
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;
    // 批量选课，已选的学生会被跳过
    async fn enroll_students(
        &self,
        subject_id: i64,
        student_ids: &[i64],
    ) -> Result<EnrollStudentsResponse>;
    async fn unenroll_student(&self, subject_id: i64, student_id: i64) -> Result<bool>;
    async fn is_student_enrolled(&self, subject_id: i64, student_id: i64) -> Result<bool>;
    async fn list_subject_students(&self, subject_id: i64) -> Result<Vec<User>>;
    async fn list_enrolled_subject_ids(&self, student_id: i64) -> Result<Vec<i64>>;

    /// 课程表
    async fn create_schedule_slot(&self, req: CreateScheduleSlotRequest) -> Result<ScheduleSlot>;
    async fn get_schedule_slot_by_id(&self, id: i64) -> Result<Option<ScheduleSlot>>;
    // subject_ids 为 None 时返回全部时段
    async fn list_schedule_slots(&self, subject_ids: Option<Vec<i64>>)
    -> Result<Vec<ScheduleSlot>>;
    async fn update_schedule_slot(
        &self,
        id: i64,
        update: UpdateScheduleSlotRequest,
    ) -> Result<Option<ScheduleSlot>>;
    async fn delete_schedule_slot(&self, id: i64) -> Result<bool>;

    /// 考勤
    // 点名：同一学生同一天同一科目只保留一条记录
    async fn upsert_attendance(
        &self,
        subject_id: i64,
        date: NaiveDate,
        recorded_by: i64,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<AttendanceRecord>>;
    async fn get_attendance_record_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn list_attendance_records(
        &self,
        subject_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn update_attendance_record(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>>;
    async fn delete_attendance_record(&self, id: i64) -> Result<bool>;

    /// 成绩
    async fn create_grade(&self, teacher_id: i64, req: CreateGradeRequest) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    async fn list_grades(
        &self,
        subject_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<Grade>>;
    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    /// 论坛
    async fn create_thread(&self, author_id: i64, req: CreateThreadRequest)
    -> Result<ForumThread>;
    async fn get_thread_by_id(&self, id: i64) -> Result<Option<ForumThread>>;
    async fn list_threads_with_pagination(
        &self,
        query: ThreadListQuery,
    ) -> Result<ThreadListResponse>;
    async fn update_thread(
        &self,
        id: i64,
        update: UpdateThreadRequest,
    ) -> Result<Option<ForumThread>>;
    async fn delete_thread(&self, id: i64) -> Result<bool>;
    // 新增回复并刷新主题的回复数和最后活动时间
    async fn create_reply(&self, thread_id: i64, author_id: i64, content: String)
    -> Result<ForumReply>;
    async fn get_reply_by_id(&self, id: i64) -> Result<Option<ForumReply>>;
    async fn list_replies(&self, thread_id: i64) -> Result<Vec<ForumReply>>;
    async fn delete_reply(&self, id: i64) -> Result<bool>;

    /// 校历
    async fn create_event(&self, created_by: i64, req: CreateEventRequest)
    -> Result<CalendarEvent>;
    async fn get_event_by_id(&self, id: i64) -> Result<Option<CalendarEvent>>;
    async fn list_events(&self, query: EventListQuery) -> Result<Vec<CalendarEvent>>;
    async fn update_event(&self, id: i64, update: UpdateEventRequest)
    -> Result<Option<CalendarEvent>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;

    /// 公告
    async fn create_announcement(
        &self,
        author_id: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement>;
    async fn get_announcement_by_id(&self, id: i64) -> Result<Option<Announcement>>;
    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse>;
    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;

    /// 教学资料
    async fn create_material(&self, uploaded_by: i64, req: CreateMaterialRequest)
    -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    async fn list_materials(&self, subject_id: i64) -> Result<Vec<Material>>;
    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 通知
    async fn create_notifications(&self, reqs: Vec<CreateNotificationRequest>) -> Result<u64>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
        unread_only: bool,
    ) -> Result<NotificationListResponse>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_read(&self, id: i64) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, id: i64) -> Result<bool>;

    /// 学生会活动
    async fn create_rep_event(&self, created_by: i64, req: CreateRepEventRequest)
    -> Result<RepEvent>;
    async fn get_rep_event_by_id(&self, id: i64) -> Result<Option<RepEvent>>;
    async fn list_rep_events_with_pagination(
        &self,
        page: i64,
        size: i64,
        status: Option<RepEventStatus>,
    ) -> Result<RepEventListResponse>;
    async fn update_rep_event(
        &self,
        id: i64,
        update: UpdateRepEventRequest,
    ) -> Result<Option<RepEvent>>;
    async fn delete_rep_event(&self, id: i64) -> Result<bool>;
    async fn register_for_rep_event(
        &self,
        event_id: i64,
        student_id: i64,
    ) -> Result<RegistrationOutcome>;
    async fn unregister_from_rep_event(&self, event_id: i64, student_id: i64) -> Result<bool>;
    async fn list_rep_event_registrations(&self, event_id: i64)
    -> Result<Vec<RepEventRegistration>>;

    /// 学生申诉
    async fn create_claim(&self, author_id: i64, req: CreateClaimRequest) -> Result<Claim>;
    async fn get_claim_by_id(&self, id: i64) -> Result<Option<Claim>>;
    async fn list_claims_with_pagination(&self, query: ClaimListQuery)
    -> Result<ClaimListResponse>;
    async fn respond_claim(
        &self,
        id: i64,
        status: ClaimStatus,
        response: Option<String>,
        responded_by: i64,
    ) -> Result<Option<Claim>>;

    /// 教学计划
    async fn create_lesson_plan(
        &self,
        teacher_id: i64,
        req: CreateLessonPlanRequest,
    ) -> Result<LessonPlan>;
    async fn get_lesson_plan_by_id(&self, id: i64) -> Result<Option<LessonPlan>>;
    async fn list_lesson_plans_with_pagination(
        &self,
        query: LessonPlanListQuery,
    ) -> Result<LessonPlanListResponse>;
    async fn update_lesson_plan(
        &self,
        id: i64,
        update: UpdateLessonPlanRequest,
    ) -> Result<Option<LessonPlan>>;
    async fn set_lesson_plan_status(
        &self,
        id: i64,
        status: LessonPlanStatus,
        review_comment: Option<String>,
        reviewed_by: Option<i64>,
    ) -> Result<Option<LessonPlan>>;
    async fn delete_lesson_plan(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
