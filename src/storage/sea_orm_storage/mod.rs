//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod announcements;
mod attendance;
mod events;
mod forums;
mod grades;
mod lesson_plans;
mod materials;
mod notifications;
mod schedules;
mod student_rep;
mod subjects;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSystemError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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

use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 科目与选课
    async fn create_subject(&self, teacher_id: i64, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(teacher_id, req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_name_and_course(
        &self,
        name: &str,
        course: &str,
    ) -> Result<Option<Subject>> {
        self.get_subject_by_name_and_course_impl(name, course).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn list_all_subjects(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        self.list_all_subjects_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn enroll_students(
        &self,
        subject_id: i64,
        student_ids: &[i64],
    ) -> Result<EnrollStudentsResponse> {
        self.enroll_students_impl(subject_id, student_ids).await
    }

    async fn unenroll_student(&self, subject_id: i64, student_id: i64) -> Result<bool> {
        self.unenroll_student_impl(subject_id, student_id).await
    }

    async fn is_student_enrolled(&self, subject_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(subject_id, student_id).await
    }

    async fn list_subject_students(&self, subject_id: i64) -> Result<Vec<User>> {
        self.list_subject_students_impl(subject_id).await
    }

    async fn list_enrolled_subject_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        self.list_enrolled_subject_ids_impl(student_id).await
    }

    // 课程表
    async fn create_schedule_slot(&self, req: CreateScheduleSlotRequest) -> Result<ScheduleSlot> {
        self.create_schedule_slot_impl(req).await
    }

    async fn get_schedule_slot_by_id(&self, id: i64) -> Result<Option<ScheduleSlot>> {
        self.get_schedule_slot_by_id_impl(id).await
    }

    async fn list_schedule_slots(
        &self,
        subject_ids: Option<Vec<i64>>,
    ) -> Result<Vec<ScheduleSlot>> {
        self.list_schedule_slots_impl(subject_ids).await
    }

    async fn update_schedule_slot(
        &self,
        id: i64,
        update: UpdateScheduleSlotRequest,
    ) -> Result<Option<ScheduleSlot>> {
        self.update_schedule_slot_impl(id, update).await
    }

    async fn delete_schedule_slot(&self, id: i64) -> Result<bool> {
        self.delete_schedule_slot_impl(id).await
    }

    // 考勤
    async fn upsert_attendance(
        &self,
        subject_id: i64,
        date: NaiveDate,
        recorded_by: i64,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<AttendanceRecord>> {
        self.upsert_attendance_impl(subject_id, date, recorded_by, entries).await
    }

    async fn get_attendance_record_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_record_by_id_impl(id).await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn list_attendance_records(
        &self,
        subject_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_records_impl(subject_id, student_id).await
    }

    async fn update_attendance_record(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        self.update_attendance_record_impl(id, update).await
    }

    async fn delete_attendance_record(&self, id: i64) -> Result<bool> {
        self.delete_attendance_record_impl(id).await
    }

    // 成绩
    async fn create_grade(&self, teacher_id: i64, req: CreateGradeRequest) -> Result<Grade> {
        self.create_grade_impl(teacher_id, req).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn list_grades(
        &self,
        subject_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<Grade>> {
        self.list_grades_impl(subject_id, student_id).await
    }

    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>> {
        self.update_grade_impl(id, update).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // 论坛
    async fn create_thread(&self, author_id: i64, req: CreateThreadRequest) -> Result<ForumThread> {
        self.create_thread_impl(author_id, req).await
    }

    async fn get_thread_by_id(&self, id: i64) -> Result<Option<ForumThread>> {
        self.get_thread_by_id_impl(id).await
    }

    async fn list_threads_with_pagination(
        &self,
        query: ThreadListQuery,
    ) -> Result<ThreadListResponse> {
        self.list_threads_with_pagination_impl(query).await
    }

    async fn update_thread(
        &self,
        id: i64,
        update: UpdateThreadRequest,
    ) -> Result<Option<ForumThread>> {
        self.update_thread_impl(id, update).await
    }

    async fn delete_thread(&self, id: i64) -> Result<bool> {
        self.delete_thread_impl(id).await
    }

    async fn create_reply(
        &self,
        thread_id: i64,
        author_id: i64,
        content: String,
    ) -> Result<ForumReply> {
        self.create_reply_impl(thread_id, author_id, content).await
    }

    async fn get_reply_by_id(&self, id: i64) -> Result<Option<ForumReply>> {
        self.get_reply_by_id_impl(id).await
    }

    async fn list_replies(&self, thread_id: i64) -> Result<Vec<ForumReply>> {
        self.list_replies_impl(thread_id).await
    }

    async fn delete_reply(&self, id: i64) -> Result<bool> {
        self.delete_reply_impl(id).await
    }

    // 校历
    async fn create_event(
        &self,
        created_by: i64,
        req: CreateEventRequest,
    ) -> Result<CalendarEvent> {
        self.create_event_impl(created_by, req).await
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<CalendarEvent>> {
        self.get_event_by_id_impl(id).await
    }

    async fn list_events(&self, query: EventListQuery) -> Result<Vec<CalendarEvent>> {
        self.list_events_impl(query).await
    }

    async fn update_event(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<CalendarEvent>> {
        self.update_event_impl(id, update).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }

    // 公告
    async fn create_announcement(
        &self,
        author_id: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        self.create_announcement_impl(author_id, req).await
    }

    async fn get_announcement_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        self.get_announcement_by_id_impl(id).await
    }

    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        self.list_announcements_with_pagination_impl(query).await
    }

    async fn update_announcement(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        self.update_announcement_impl(id, update).await
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        self.delete_announcement_impl(id).await
    }

    // 教学资料
    async fn create_material(
        &self,
        uploaded_by: i64,
        req: CreateMaterialRequest,
    ) -> Result<Material> {
        self.create_material_impl(uploaded_by, req).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_materials(&self, subject_id: i64) -> Result<Vec<Material>> {
        self.list_materials_impl(subject_id).await
    }

    async fn update_material(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        self.update_material_impl(id, update).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 通知

    async fn create_notifications(&self, reqs: Vec<CreateNotificationRequest>) -> Result<u64> {
        self.create_notifications_impl(reqs).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
        unread_only: bool,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, page, size, unread_only).await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64> {
        self.count_unread_notifications_impl(user_id).await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<bool> {
        self.mark_notification_read_impl(id).await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_read_impl(user_id).await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    // 学生会活动
    async fn create_rep_event(
        &self,
        created_by: i64,
        req: CreateRepEventRequest,
    ) -> Result<RepEvent> {
        self.create_rep_event_impl(created_by, req).await
    }

    async fn get_rep_event_by_id(&self, id: i64) -> Result<Option<RepEvent>> {
        self.get_rep_event_by_id_impl(id).await
    }

    async fn list_rep_events_with_pagination(
        &self,
        page: i64,
        size: i64,
        status: Option<RepEventStatus>,
    ) -> Result<RepEventListResponse> {
        self.list_rep_events_with_pagination_impl(page, size, status).await
    }

    async fn update_rep_event(
        &self,
        id: i64,
        update: UpdateRepEventRequest,
    ) -> Result<Option<RepEvent>> {
        self.update_rep_event_impl(id, update).await
    }

    async fn delete_rep_event(&self, id: i64) -> Result<bool> {
        self.delete_rep_event_impl(id).await
    }

    async fn register_for_rep_event(
        &self,
        event_id: i64,
        student_id: i64,
    ) -> Result<RegistrationOutcome> {
        self.register_for_rep_event_impl(event_id, student_id).await
    }

    async fn unregister_from_rep_event(&self, event_id: i64, student_id: i64) -> Result<bool> {
        self.unregister_from_rep_event_impl(event_id, student_id).await
    }

    async fn list_rep_event_registrations(
        &self,
        event_id: i64,
    ) -> Result<Vec<RepEventRegistration>> {
        self.list_rep_event_registrations_impl(event_id).await
    }

    // 学生申诉
    async fn create_claim(&self, author_id: i64, req: CreateClaimRequest) -> Result<Claim> {
        self.create_claim_impl(author_id, req).await
    }

    async fn get_claim_by_id(&self, id: i64) -> Result<Option<Claim>> {
        self.get_claim_by_id_impl(id).await
    }

    async fn list_claims_with_pagination(
        &self,
        query: ClaimListQuery,
    ) -> Result<ClaimListResponse> {
        self.list_claims_with_pagination_impl(query).await
    }

    async fn respond_claim(
        &self,
        id: i64,
        status: ClaimStatus,
        response: Option<String>,
        responded_by: i64,
    ) -> Result<Option<Claim>> {
        self.respond_claim_impl(id, status, response, responded_by).await
    }

    // 教学计划
    async fn create_lesson_plan(
        &self,
        teacher_id: i64,
        req: CreateLessonPlanRequest,
    ) -> Result<LessonPlan> {
        self.create_lesson_plan_impl(teacher_id, req).await
    }

    async fn get_lesson_plan_by_id(&self, id: i64) -> Result<Option<LessonPlan>> {
        self.get_lesson_plan_by_id_impl(id).await
    }

    async fn list_lesson_plans_with_pagination(
        &self,
        query: LessonPlanListQuery,
    ) -> Result<LessonPlanListResponse> {
        self.list_lesson_plans_with_pagination_impl(query).await
    }

    async fn update_lesson_plan(
        &self,
        id: i64,
        update: UpdateLessonPlanRequest,
    ) -> Result<Option<LessonPlan>> {
        self.update_lesson_plan_impl(id, update).await
    }

    async fn set_lesson_plan_status(
        &self,
        id: i64,
        status: LessonPlanStatus,
        review_comment: Option<String>,
        reviewed_by: Option<i64>,
    ) -> Result<Option<LessonPlan>> {
        self.set_lesson_plan_status_impl(id, status, review_comment, reviewed_by).await
    }

    async fn delete_lesson_plan(&self, id: i64) -> Result<bool> {
        self.delete_lesson_plan_impl(id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::subjects::{entities::Subject, requests::CreateSubjectRequest};
    use crate::models::users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    };
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    /// 内存 SQLite，单连接保证所有查询落在同一个库上
    pub async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        SeaOrmStorage { db }
    }

    pub async fn create_user(
        storage: &SeaOrmStorage,
        username: &str,
        role: UserRole,
        course: Option<&str>,
    ) -> User {
        storage
            .create_user_impl(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@school.test"),
                password: "hashed".to_string(),
                role,
                display_name: None,
                course: course.map(str::to_string),
            })
            .await
            .unwrap()
    }

    pub async fn create_subject(
        storage: &SeaOrmStorage,
        teacher_id: i64,
        name: &str,
        course: &str,
    ) -> Subject {
        storage
            .create_subject_impl(
                teacher_id,
                CreateSubjectRequest {
                    name: name.to_string(),
                    course: course.to_string(),
                    teacher_id: None,
                    description: None,
                },
            )
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").unwrap(),
            "sqlite://school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }
}
