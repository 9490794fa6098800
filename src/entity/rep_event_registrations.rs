//! 活动报名实体

use sea_orm::entity::prelude::*;

use super::from_timestamp;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rep_event_registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub registered_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rep_events::Entity",
        from = "Column::EventId",
        to = "super::rep_events::Column::Id"
    )]
    Event,
}

impl Related<super::rep_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_registration(self) -> crate::models::student_rep::entities::RepEventRegistration {
        crate::models::student_rep::entities::RepEventRegistration {
            id: self.id,
            event_id: self.event_id,
            student_id: self.student_id,
            registered_at: from_timestamp(self.registered_at),
        }
    }
}
