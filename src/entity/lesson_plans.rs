//! 教学计划实体

use sea_orm::entity::prelude::*;

use super::{from_date_str, from_timestamp};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lesson_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub objectives: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub starts_on: String,
    pub ends_on: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub review_comment: Option<String>,
    pub reviewed_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lesson_plan(self) -> crate::models::lesson_plans::entities::LessonPlan {
        use crate::models::lesson_plans::entities::{LessonPlan, LessonPlanStatus};

        LessonPlan {
            id: self.id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            title: self.title,
            objectives: self.objectives,
            content: self.content,
            starts_on: from_date_str(&self.starts_on),
            ends_on: from_date_str(&self.ends_on),
            status: self
                .status
                .parse::<LessonPlanStatus>()
                .unwrap_or(LessonPlanStatus::Draft),
            review_comment: self.review_comment,
            reviewed_by: self.reviewed_by,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
