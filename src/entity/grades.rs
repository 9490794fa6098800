//! 成绩实体

use sea_orm::entity::prelude::*;

use super::{from_date_str, from_timestamp};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub kind: String,
    pub score: f64,
    pub term: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub graded_on: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use crate::models::grades::entities::{Grade, GradeKind};

        Grade {
            id: self.id,
            subject_id: self.subject_id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            title: self.title,
            kind: self.kind.parse::<GradeKind>().unwrap_or(GradeKind::Other),
            score: self.score,
            term: self.term,
            comment: self.comment,
            graded_on: from_date_str(&self.graded_on),
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
