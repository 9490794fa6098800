//! 学生申诉实体

use sea_orm::entity::prelude::*;

use super::from_timestamp;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "claims")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub responded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_claim(self) -> crate::models::student_rep::entities::Claim {
        use crate::models::student_rep::entities::{Claim, ClaimStatus};

        Claim {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            description: self.description,
            category: self.category,
            status: self
                .status
                .parse::<ClaimStatus>()
                .unwrap_or(ClaimStatus::Pending),
            response: self.response,
            responded_by: self.responded_by,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
