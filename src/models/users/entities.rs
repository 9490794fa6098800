use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 用户角色
    UserRole, "../frontend/src/types/generated/user.ts" {
        Student => "student",
        Teacher => "teacher",
        Preceptor => "preceptor",
        StudentRep => "student_rep",
        Admin => "admin",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    /// 教职人员（可以管理校历、公告等）
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Preceptor, &Self::Admin]
    }
    /// 可以点名的角色
    pub fn attendance_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Preceptor, &Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::StudentRep]
    }
    /// 学生会管理角色
    pub fn student_rep_roles() -> &'static [&'static UserRole] {
        &[&Self::StudentRep, &Self::Admin]
    }
    /// 可以发布公告的角色
    pub fn announcement_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Preceptor, &Self::StudentRep, &Self::Admin]
    }
    /// 可以处理申诉的角色
    pub fn claim_reviewer_roles() -> &'static [&'static UserRole] {
        &[&Self::StudentRep, &Self::Preceptor, &Self::Admin]
    }

    /// 是否为学生（含学生会代表）
    pub fn is_student(&self) -> bool {
        matches!(self, UserRole::Student | UserRole::StudentRep)
    }

    /// 是否为行政人员（可查看全校数据）
    pub fn is_school_staff(&self) -> bool {
        matches!(self, UserRole::Preceptor | UserRole::Admin)
    }
}

define_string_enum! {
    /// 用户状态
    UserStatus, "../frontend/src/types/generated/user.ts" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    /// 所在年级/班级，例如 "5A"
    pub course: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 用户简要信息，用于列表中嵌入展示
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserBrief {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub course: Option<String>,
}

impl From<&User> for UserBrief {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            course: user.course.clone(),
        }
    }
}

impl User {
    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role,
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_strings() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), *role);
        }
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<UserRole>(r#""director""#).unwrap_err();
        assert!(err.to_string().contains("student_rep"));
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::StudentRep.is_student());
        assert!(!UserRole::Teacher.is_student());
        assert!(UserRole::Preceptor.is_school_staff());
        assert!(!UserRole::Teacher.is_school_staff());
    }
}
