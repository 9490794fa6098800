use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 教学计划状态
    LessonPlanStatus, "../frontend/src/types/generated/lesson_plan.ts" {
        Draft => "draft",
        Submitted => "submitted",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl LessonPlanStatus {
    /// 草稿和被驳回的计划可以修改
    pub fn is_editable(&self) -> bool {
        matches!(self, LessonPlanStatus::Draft | LessonPlanStatus::Rejected)
    }

    /// 审核结果只能是通过或驳回
    pub fn is_review_outcome(&self) -> bool {
        matches!(self, LessonPlanStatus::Approved | LessonPlanStatus::Rejected)
    }
}

// 教学计划（planificación）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_plan.ts")]
pub struct LessonPlan {
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub objectives: Option<String>,
    pub content: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub status: LessonPlanStatus,
    pub review_comment: Option<String>,
    pub reviewed_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_states() {
        assert!(LessonPlanStatus::Draft.is_editable());
        assert!(LessonPlanStatus::Rejected.is_editable());
        assert!(!LessonPlanStatus::Submitted.is_editable());
        assert!(!LessonPlanStatus::Approved.is_editable());
    }

    #[test]
    fn test_review_outcomes() {
        assert!(LessonPlanStatus::Approved.is_review_outcome());
        assert!(LessonPlanStatus::Rejected.is_review_outcome());
        assert!(!LessonPlanStatus::Draft.is_review_outcome());
    }
}
