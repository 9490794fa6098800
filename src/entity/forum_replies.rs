//! 论坛回复实体

use sea_orm::entity::prelude::*;

use super::from_timestamp;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_replies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub thread_id: i64,
    pub author_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_threads::Entity",
        from = "Column::ThreadId",
        to = "super::forum_threads::Column::Id"
    )]
    Thread,
}

impl Related<super::forum_threads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_reply(self) -> crate::models::forums::entities::ForumReply {
        crate::models::forums::entities::ForumReply {
            id: self.id,
            thread_id: self.thread_id,
            author_id: self.author_id,
            content: self.content,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
