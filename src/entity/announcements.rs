//! 公告实体

use sea_orm::entity::prelude::*;

use super::from_timestamp;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub audience: String,
    pub course: Option<String>,
    pub subject_id: Option<i64>,
    pub pinned: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_announcement(self) -> crate::models::announcements::entities::Announcement {
        use crate::models::announcements::entities::{Announcement, Audience};

        Announcement {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            audience: self.audience.parse::<Audience>().unwrap_or(Audience::All),
            course: self.course,
            subject_id: self.subject_id,
            pinned: self.pinned,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
