//! 论坛主题实体

use sea_orm::entity::prelude::*;

use super::from_timestamp;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_threads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: Option<i64>,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub pinned: bool,
    pub locked: bool,
    pub reply_count: i32,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_activity_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::forum_replies::Entity")]
    Replies,
}

impl Related<super::forum_replies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_thread(self) -> crate::models::forums::entities::ForumThread {
        crate::models::forums::entities::ForumThread {
            id: self.id,
            subject_id: self.subject_id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            pinned: self.pinned,
            locked: self.locked,
            reply_count: self.reply_count,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
            last_activity_at: from_timestamp(self.last_activity_at),
        }
    }
}
