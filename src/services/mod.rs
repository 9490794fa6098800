pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod events;
pub mod forums;
pub mod grades;
pub mod lesson_plans;
pub mod materials;
pub mod notifications;
pub mod schedules;
pub mod student_rep;
pub mod subjects;
pub mod system;
pub mod users;

pub use announcements::AnnouncementService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use events::EventService;
pub use forums::ForumService;
pub use grades::GradeService;
pub use lesson_plans::LessonPlanService;
pub use materials::MaterialService;
pub use notifications::NotificationService;
pub use schedules::ScheduleService;
pub use student_rep::StudentRepService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::SchoolSystemError;
use crate::middlewares::{RequireJWT, RequireSubjectAccess, SubjectAccess};
use crate::models::{
    ApiResponse, ErrorCode, notifications::entities::NotificationKind,
    notifications::requests::CreateNotificationRequest, subjects::entities::Subject,
    users::entities::User,
};
use crate::storage::Storage;

/// 取出当前登录用户，没有时直接给出 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn internal_error(context: &str, e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{context}: {e}");
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {e}"),
    ))
}

/// 按存储层错误类型选择 HTTP 状态码
pub(crate) fn storage_error(context: &str, e: SchoolSystemError) -> HttpResponse {
    let (status, code) = match &e {
        SchoolSystemError::Validation(_) => (
            actix_web::http::StatusCode::BAD_REQUEST,
            ErrorCode::ValidationFailed,
        ),
        SchoolSystemError::NotFound(_) => (actix_web::http::StatusCode::NOT_FOUND, ErrorCode::NotFound),
        SchoolSystemError::Conflict(_) | SchoolSystemError::InvalidState(_) => {
            (actix_web::http::StatusCode::CONFLICT, ErrorCode::Conflict)
        }
        _ => return internal_error(context, e),
    };
    HttpResponse::build(status).json(ApiResponse::error_empty(code, format!("{context}: {}", e.message())))
}

pub(crate) fn forbidden(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

/// 加载科目，不存在时返回 404 响应
pub(crate) async fn load_subject(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
) -> Result<Subject, HttpResponse> {
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => Ok(subject),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(e) => Err(internal_error("Failed to load subject", e)),
    }
}

/// 优先使用 RequireSubjectAccess 已加载的科目
pub(crate) async fn scoped_subject(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    subject_id: i64,
) -> Result<Subject, HttpResponse> {
    match RequireSubjectAccess::extract_subject(request) {
        Some(subject) if subject.id == subject_id => Ok(subject),
        _ => load_subject(storage, subject_id).await,
    }
}

/// 能否管理该科目：管理员或任课教师
pub(crate) fn can_manage_subject(user: &User, subject: &Subject) -> bool {
    has_subject_access(SubjectAccess::Manage, user, subject, false)
}

/// `enrolled` 仅对学生有意义
pub(crate) fn has_subject_access(
    access: SubjectAccess,
    user: &User,
    subject: &Subject,
    enrolled: bool,
) -> bool {
    crate::middlewares::require_subject_access::role_grants_access(access, user, subject)
        .unwrap_or(enrolled)
}

/// 查询后判断访问权限，学生需要查询选课记录
pub(crate) async fn check_subject_access(
    storage: &Arc<dyn Storage>,
    access: SubjectAccess,
    user: &User,
    subject: &Subject,
) -> Result<(), HttpResponse> {
    let allowed =
        match crate::middlewares::require_subject_access::role_grants_access(access, user, subject) {
            Some(allowed) => allowed,
            None => storage
                .is_student_enrolled(subject.id, user.id)
                .await
                .map_err(|e| internal_error("Failed to check enrolment", e))?,
        };
    if allowed {
        Ok(())
    } else {
        Err(forbidden(
            ErrorCode::SubjectPermissionDenied,
            "No permission for this subject",
        ))
    }
}

/// 确定汇总查询的目标学生：学生只能查自己，教职人员需要有科目权限并指定学生
pub(crate) async fn resolve_summary_student(
    storage: &Arc<dyn Storage>,
    user: &User,
    subject: &Subject,
    student_id: Option<i64>,
) -> Result<i64, HttpResponse> {
    let student_id = if user.role.is_student() {
        match student_id {
            None => user.id,
            Some(id) if id == user.id => id,
            Some(_) => {
                return Err(forbidden(
                    ErrorCode::Forbidden,
                    "Students can only view their own records",
                ));
            }
        }
    } else {
        if !has_subject_access(SubjectAccess::Staff, user, subject, false) {
            return Err(forbidden(
                ErrorCode::SubjectPermissionDenied,
                "No permission for this subject",
            ));
        }
        match student_id {
            Some(id) => id,
            None => return Err(bad_request(ErrorCode::ValidationFailed, "student_id is required")),
        }
    };

    match storage.is_student_enrolled(subject.id, student_id).await {
        Ok(true) => Ok(student_id),
        Ok(false) => Err(not_found(
            ErrorCode::StudentNotEnrolled,
            "Student is not enrolled in this subject",
        )),
        Err(e) => Err(internal_error("Failed to check enrolment", e)),
    }
}

/// 发送通知，失败只记录日志，不影响主流程
pub(crate) async fn notify(
    storage: &Arc<dyn Storage>,
    user_ids: Vec<i64>,
    kind: NotificationKind,
    title: String,
    content: String,
    link: Option<String>,
) {
    if user_ids.is_empty() {
        return;
    }
    let reqs = user_ids
        .into_iter()
        .map(|user_id| CreateNotificationRequest {
            user_id,
            kind,
            title: title.clone(),
            content: content.clone(),
            link: link.clone(),
        })
        .collect();
    if let Err(e) = storage.create_notifications(reqs).await {
        tracing::warn!("Failed to create {} notifications: {}", kind, e);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::subjects::entities::Subject;
    use crate::models::users::entities::{User, UserRole, UserStatus};

    pub(crate) fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@school.test"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            course: None,
            avatar_url: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    pub(crate) fn subject(id: i64, teacher_id: i64, course: &str) -> Subject {
        Subject {
            id,
            name: format!("Subject {id}"),
            course: course.to_string(),
            teacher_id,
            description: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }
}
