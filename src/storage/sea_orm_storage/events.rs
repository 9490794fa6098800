use super::SeaOrmStorage;
use crate::entity::calendar_events::{ActiveModel, Column, Entity as CalendarEvents};
use crate::errors::{Result, SchoolSystemError};
use crate::models::events::{
    entities::CalendarEvent,
    requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
};
use crate::utils::time::format_date;
use crate::utils::validate::normalize_course;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建校历事件
    pub async fn create_event_impl(
        &self,
        created_by: i64,
        req: CreateEventRequest,
    ) -> Result<CalendarEvent> {
        let now = chrono::Utc::now().timestamp();
        let ends_on = req.ends_on.unwrap_or(req.starts_on);

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            kind: Set(req.kind.to_string()),
            subject_id: Set(req.subject_id),
            course: Set(req.course.as_deref().and_then(normalize_course)),
            starts_on: Set(format_date(req.starts_on)),
            ends_on: Set(format_date(ends_on)),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("创建校历事件失败: {e}"))
        })?;

        Ok(result.into_event())
    }

    /// 通过 ID 获取校历事件
    pub async fn get_event_by_id_impl(&self, id: i64) -> Result<Option<CalendarEvent>> {
        let result = CalendarEvents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询校历事件失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 列出与 [from, to] 有交集的事件
    pub async fn list_events_impl(&self, query: EventListQuery) -> Result<Vec<CalendarEvent>> {
        let mut select = CalendarEvents::find();

        if let Some(to) = query.to {
            select = select.filter(Column::StartsOn.lte(format_date(to)));
        }

        if let Some(from) = query.from {
            select = select.filter(Column::EndsOn.gte(format_date(from)));
        }

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(course) = query.course.as_deref().and_then(normalize_course) {
            select = select.filter(Column::Course.eq(course));
        }

        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }

        let events = select
            .order_by_asc(Column::StartsOn)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询校历事件失败: {e}"))
            })?;

        Ok(events.into_iter().map(|m| m.into_event()).collect())
    }

    /// 更新校历事件
    pub async fn update_event_impl(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<CalendarEvent>> {
        let existing = CalendarEvents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询校历事件失败: {e}"))
            })?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(kind) = update.kind {
            model.kind = Set(kind.to_string());
        }

        if let Some(course) = update.course {
            model.course = Set(normalize_course(&course));
        }

        if let Some(starts_on) = update.starts_on {
            model.starts_on = Set(format_date(starts_on));
        }

        if let Some(ends_on) = update.ends_on {
            model.ends_on = Set(format_date(ends_on));
        }

        let result = model.update(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("更新校历事件失败: {e}"))
        })?;

        Ok(Some(result.into_event()))
    }

    /// 删除校历事件
    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let result = CalendarEvents::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("删除校历事件失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_user, memory_storage};
    use crate::models::events::entities::EventKind;
    use crate::models::events::requests::{CreateEventRequest, EventListQuery};
    use crate::models::users::entities::UserRole;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_list_events_by_overlap() {
        let storage = memory_storage().await;
        let admin = create_user(&storage, "director", UserRole::Admin, None).await;

        for (title, starts, ends) in [
            ("Receso invernal", day(7, 14), Some(day(7, 25))),
            ("Acto 9 de julio", day(7, 9), None),
            ("Mesa de examen", day(8, 4), Some(day(8, 8))),
        ] {
            storage
                .create_event_impl(
                    admin.id,
                    CreateEventRequest {
                        title: title.to_string(),
                        description: None,
                        kind: EventKind::Holiday,
                        subject_id: None,
                        course: None,
                        starts_on: starts,
                        ends_on: ends,
                    },
                )
                .await
                .unwrap();
        }

        let july_end = storage
            .list_events_impl(EventListQuery {
                from: Some(day(7, 20)),
                to: Some(day(7, 31)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(july_end.len(), 1);
        assert_eq!(july_end[0].title, "Receso invernal");

        let single_day = storage
            .list_events_impl(EventListQuery {
                from: Some(day(7, 9)),
                to: Some(day(7, 9)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(single_day.len(), 1);
        assert_eq!(single_day[0].ends_on, day(7, 9));
    }
}
