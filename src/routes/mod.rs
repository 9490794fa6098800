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

pub use announcements::configure_announcement_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use events::configure_event_routes;
pub use forums::configure_forum_routes;
pub use grades::configure_grade_routes;
pub use lesson_plans::configure_lesson_plan_routes;
pub use materials::configure_material_routes;
pub use notifications::configure_notification_routes;
pub use schedules::configure_schedule_routes;
pub use student_rep::configure_student_rep_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
