//! 课程时段实体

use sea_orm::entity::prelude::*;

use super::from_timestamp;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    /// 1 = 周一 ... 7 = 周日
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub classroom: Option<String>,
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
    pub fn into_schedule_slot(self) -> crate::models::schedules::entities::ScheduleSlot {
        use crate::models::schedules::entities::{ScheduleSlot, Weekday};
        use crate::utils::time::parse_time;

        ScheduleSlot {
            id: self.id,
            subject_id: self.subject_id,
            day_of_week: Weekday::from_number(self.day_of_week).unwrap_or(Weekday::Monday),
            start_time: parse_time(&self.start_time).unwrap_or_default(),
            end_time: parse_time(&self.end_time).unwrap_or_default(),
            classroom: self.classroom,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
