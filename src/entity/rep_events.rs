//! 学生会活动实体

use sea_orm::entity::prelude::*;

use super::from_timestamp;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rep_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: i64,
    pub capacity: Option<i32>,
    pub status: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rep_event_registrations::Entity")]
    Registrations,
}

impl Related<super::rep_event_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 报名人数不在表中，需要调用方单独统计
    pub fn into_rep_event(self, registered_count: i64) -> crate::models::student_rep::entities::RepEvent {
        use crate::models::student_rep::entities::{RepEvent, RepEventStatus};

        RepEvent {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            starts_at: from_timestamp(self.starts_at),
            capacity: self.capacity,
            status: self
                .status
                .parse::<RepEventStatus>()
                .unwrap_or(RepEventStatus::Closed),
            created_by: self.created_by,
            registered_count,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
