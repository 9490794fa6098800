use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::{User, UserRole};

define_string_enum! {
    /// 公告受众
    Audience, "../frontend/src/types/generated/announcement.ts" {
        All => "all",
        Students => "students",
        Teachers => "teachers",
        Preceptors => "preceptors",
    }
}

impl Audience {
    /// 用户角色对应的受众分组，管理员不属于任何分组（可见全部）
    pub fn for_role(role: UserRole) -> Option<Audience> {
        match role {
            UserRole::Student | UserRole::StudentRep => Some(Audience::Students),
            UserRole::Teacher => Some(Audience::Teachers),
            UserRole::Preceptor => Some(Audience::Preceptors),
            UserRole::Admin => None,
        }
    }
}

// 公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub course: Option<String>,
    pub subject_id: Option<i64>,
    pub pinned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Announcement {
    /// 判断公告对某用户是否可见
    pub fn is_visible_to(&self, user: &User) -> bool {
        if user.role == UserRole::Admin || self.author_id == user.id {
            return true;
        }

        let audience_matches = self.audience == Audience::All
            || Audience::for_role(user.role) == Some(self.audience);
        if !audience_matches {
            return false;
        }

        match &self.course {
            None => true,
            Some(course) => {
                !user.role.is_student()
                    || user
                        .course
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(course))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(id: i64, role: UserRole, course: Option<&str>) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@school.test"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            course: course.map(str::to_string),
            avatar_url: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn announcement(audience: Audience, course: Option<&str>) -> Announcement {
        Announcement {
            id: 1,
            author_id: 100,
            title: "Acto".to_string(),
            content: "Acto del 25 de mayo".to_string(),
            audience,
            course: course.map(str::to_string),
            subject_id: None,
            pinned: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_all_audience_visible_to_everyone() {
        let a = announcement(Audience::All, None);
        for role in UserRole::ALL {
            assert!(a.is_visible_to(&user(1, *role, Some("5A"))));
        }
    }

    #[test]
    fn test_role_audience_filters_other_groups() {
        let a = announcement(Audience::Teachers, None);
        assert!(a.is_visible_to(&user(1, UserRole::Teacher, None)));
        assert!(!a.is_visible_to(&user(2, UserRole::Student, Some("5A"))));
        assert!(a.is_visible_to(&user(3, UserRole::Admin, None)));
    }

    #[test]
    fn test_course_restricts_students_only() {
        let a = announcement(Audience::All, Some("5A"));
        assert!(a.is_visible_to(&user(1, UserRole::Student, Some("5a"))));
        assert!(!a.is_visible_to(&user(2, UserRole::Student, Some("4B"))));
        assert!(!a.is_visible_to(&user(3, UserRole::StudentRep, None)));
        assert!(a.is_visible_to(&user(4, UserRole::Teacher, None)));
    }

    #[test]
    fn test_author_always_sees_own_announcement() {
        let a = announcement(Audience::Teachers, None);
        assert!(a.is_visible_to(&user(100, UserRole::StudentRep, None)));
    }
}
