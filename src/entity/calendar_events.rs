//! 校历事件实体

use sea_orm::entity::prelude::*;

use super::{from_date_str, from_timestamp};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "calendar_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub kind: String,
    pub subject_id: Option<i64>,
    pub course: Option<String>,
    pub starts_on: String,
    pub ends_on: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_event(self) -> crate::models::events::entities::CalendarEvent {
        use crate::models::events::entities::{CalendarEvent, EventKind};

        CalendarEvent {
            id: self.id,
            title: self.title,
            description: self.description,
            kind: self.kind.parse::<EventKind>().unwrap_or(EventKind::Activity),
            subject_id: self.subject_id,
            course: self.course,
            starts_on: from_date_str(&self.starts_on),
            ends_on: from_date_str(&self.ends_on),
            created_by: self.created_by,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
