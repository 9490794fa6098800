//! 业务数据模型
//!
//! 每个领域按 `entities`（业务实体）、`requests`（请求参数）、`responses`（响应体）拆分，
//! 所有对外类型通过 ts-rs 导出 TypeScript 定义供前端使用。

/// 生成以字符串存储的枚举类型
///
/// 自动生成：
/// - enum 定义（serde 使用给定字符串）
/// - as_str() / Display / FromStr
/// - 带有友好错误信息的 Deserialize
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $ts_path:tt {
            $($variant:ident => $value:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, ts_rs::TS)]
        #[ts(export, export_to = $ts_path)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            fn supported_values() -> String {
                [$($value),+].join(", ")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: '{s}'. Supported: {}",
                        stringify!($name),
                        $name::supported_values()
                    )),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse::<$name>().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod common;
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

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,

    // 认证授权
    Unauthorized = 2001,
    AuthFailed = 2002,
    Forbidden = 2003,
    UserInactive = 2004,

    // 用户
    UserNotFound = 3001,
    UserNameAlreadyExists = 3002,
    UserEmailAlreadyExists = 3003,
    UserNameInvalid = 3004,
    UserEmailInvalid = 3005,
    UserPasswordInvalid = 3006,
    RegisterFailed = 3007,
    CanNotDeleteCurrentUser = 3008,

    // 科目
    SubjectNotFound = 4001,
    SubjectAlreadyExists = 4002,
    SubjectPermissionDenied = 4003,
    StudentNotEnrolled = 4004,

    // 课程表
    ScheduleSlotNotFound = 4101,
    ScheduleConflict = 4102,
    ScheduleInvalidTime = 4103,

    // 考勤
    AttendanceRecordNotFound = 4201,

    // 成绩
    GradeNotFound = 4301,
    GradeOutOfRange = 4302,

    // 论坛
    ThreadNotFound = 4401,
    ThreadLocked = 4402,
    ReplyNotFound = 4403,

    // 校历 / 公告 / 资料 / 通知
    EventNotFound = 4501,
    AnnouncementNotFound = 4502,
    MaterialNotFound = 4503,
    NotificationNotFound = 4504,

    // 学生会
    RepEventNotFound = 4601,
    RepEventFull = 4602,
    RepEventClosed = 4603,
    AlreadyRegistered = 4604,
    ClaimNotFound = 4605,
    InvalidStatusTransition = 4606,

    // 教学计划
    LessonPlanNotFound = 4701,
    LessonPlanNotEditable = 4702,

    InternalServerError = 5000,
}
