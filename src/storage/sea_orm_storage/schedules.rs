use super::SeaOrmStorage;
use crate::entity::schedule_slots::{ActiveModel, Column, Entity as ScheduleSlots};
use crate::errors::{Result, SchoolSystemError};
use crate::models::schedules::{
    entities::ScheduleSlot,
    requests::{CreateScheduleSlotRequest, UpdateScheduleSlotRequest},
};
use crate::utils::time::format_time;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建课程时段
    pub async fn create_schedule_slot_impl(
        &self,
        req: CreateScheduleSlotRequest,
    ) -> Result<ScheduleSlot> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            day_of_week: Set(req.day_of_week.number()),
            start_time: Set(format_time(req.start_time)),
            end_time: Set(format_time(req.end_time)),
            classroom: Set(req.classroom),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("创建课程时段失败: {e}"))
        })?;

        Ok(result.into_schedule_slot())
    }

    /// 通过 ID 获取课程时段
    pub async fn get_schedule_slot_by_id_impl(&self, id: i64) -> Result<Option<ScheduleSlot>> {
        let result = ScheduleSlots::find_by_id(id).one(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询课程时段失败: {e}"))
        })?;

        Ok(result.map(|m| m.into_schedule_slot()))
    }

    /// 列出课程时段，按星期和开始时间排序
    pub async fn list_schedule_slots_impl(
        &self,
        subject_ids: Option<Vec<i64>>,
    ) -> Result<Vec<ScheduleSlot>> {
        let mut select = ScheduleSlots::find();

        if let Some(ids) = subject_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::SubjectId.is_in(ids));
        }

        let slots = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询课程表失败: {e}"))
            })?;

        Ok(slots.into_iter().map(|m| m.into_schedule_slot()).collect())
    }

    /// 更新课程时段
    pub async fn update_schedule_slot_impl(
        &self,
        id: i64,
        update: UpdateScheduleSlotRequest,
    ) -> Result<Option<ScheduleSlot>> {
        let existing = ScheduleSlots::find_by_id(id).one(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询课程时段失败: {e}"))
        })?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(day) = update.day_of_week {
            model.day_of_week = Set(day.number());
        }

        if let Some(start) = update.start_time {
            model.start_time = Set(format_time(start));
        }

        if let Some(end) = update.end_time {
            model.end_time = Set(format_time(end));
        }

        if let Some(classroom) = update.classroom {
            let classroom = classroom.trim().to_string();
            model.classroom = Set((!classroom.is_empty()).then_some(classroom));
        }

        let result = model.update(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("更新课程时段失败: {e}"))
        })?;

        Ok(Some(result.into_schedule_slot()))
    }

    /// 删除课程时段
    pub async fn delete_schedule_slot_impl(&self, id: i64) -> Result<bool> {
        let result = ScheduleSlots::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("删除课程时段失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_subject, create_user, memory_storage};
    use crate::models::schedules::entities::Weekday;
    use crate::models::schedules::requests::{
        CreateScheduleSlotRequest, UpdateScheduleSlotRequest,
    };
    use crate::models::users::entities::UserRole;
    use chrono::NaiveTime;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_slots_are_sorted_by_day_and_time() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let subject = create_subject(&storage, teacher.id, "Física", "5A").await;

        for (day, start) in [
            (Weekday::Wednesday, hm(8, 0)),
            (Weekday::Monday, hm(10, 0)),
            (Weekday::Monday, hm(8, 0)),
        ] {
            storage
                .create_schedule_slot_impl(CreateScheduleSlotRequest {
                    subject_id: subject.id,
                    day_of_week: day,
                    start_time: start,
                    end_time: start + chrono::Duration::minutes(80),
                    classroom: Some("Aula 3".to_string()),
                })
                .await
                .unwrap();
        }

        let slots = storage
            .list_schedule_slots_impl(Some(vec![subject.id]))
            .await
            .unwrap();
        let order: Vec<_> = slots.iter().map(|s| (s.day_of_week, s.start_time)).collect();
        assert_eq!(
            order,
            vec![
                (Weekday::Monday, hm(8, 0)),
                (Weekday::Monday, hm(10, 0)),
                (Weekday::Wednesday, hm(8, 0)),
            ]
        );

        assert!(
            storage
                .list_schedule_slots_impl(Some(Vec::new()))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_update_slot_clears_classroom() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let subject = create_subject(&storage, teacher.id, "Física", "5A").await;
        let slot = storage
            .create_schedule_slot_impl(CreateScheduleSlotRequest {
                subject_id: subject.id,
                day_of_week: Weekday::Friday,
                start_time: hm(9, 0),
                end_time: hm(10, 0),
                classroom: Some("Lab".to_string()),
            })
            .await
            .unwrap();

        let updated = storage
            .update_schedule_slot_impl(
                slot.id,
                UpdateScheduleSlotRequest {
                    end_time: Some(hm(10, 30)),
                    classroom: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.end_time, hm(10, 30));
        assert_eq!(updated.classroom, None);
        assert_eq!(updated.day_of_week, Weekday::Friday);
    }
}
