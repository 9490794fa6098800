use super::SeaOrmStorage;
use crate::entity::attendance_records::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceEntry, AttendanceListQuery, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
    common::pagination::normalize_page,
};
use crate::utils::time::format_date;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 点名：存在则覆盖状态，不存在则新建
    pub async fn upsert_attendance_impl(
        &self,
        subject_id: i64,
        date: NaiveDate,
        recorded_by: i64,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<AttendanceRecord>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let date = format_date(date);
        let mut records = Vec::with_capacity(entries.len());

        for entry in entries {
            let existing = AttendanceRecords::find()
                .filter(Column::SubjectId.eq(subject_id))
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::Date.eq(date.as_str()))
                .one(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("查询考勤记录失败: {e}"))
                })?;

            let saved = match existing {
                Some(model) => {
                    let mut active = model.into_active_model();
                    active.status = Set(entry.status.to_string());
                    active.note = Set(entry.note.clone());
                    active.recorded_by = Set(recorded_by);
                    active.updated_at = Set(now);
                    active.update(&txn).await
                }
                None => {
                    ActiveModel {
                        subject_id: Set(subject_id),
                        student_id: Set(entry.student_id),
                        date: Set(date.clone()),
                        status: Set(entry.status.to_string()),
                        note: Set(entry.note.clone()),
                        recorded_by: Set(recorded_by),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                }
            }
            .map_err(|e| SchoolSystemError::database_operation(format!("保存考勤记录失败: {e}")))?;

            records.push(saved.into_attendance_record());
        }

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(records)
    }

    /// 通过 ID 获取考勤记录
    pub async fn get_attendance_record_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<AttendanceRecord>> {
        let result = AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询考勤记录失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_attendance_record()))
    }

    /// 分页列出考勤记录
    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = AttendanceRecords::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(ids) = query.subject_ids {
            select = select.filter(Column::SubjectId.is_in(ids));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 日期以 YYYY-MM-DD 存储，字符串比较即可
        if let Some(from) = query.date_from {
            select = select.filter(Column::Date.gte(format_date(from)));
        }

        if let Some(to) = query.date_to {
            select = select.filter(Column::Date.lte(format_date(to)));
        }

        select = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询考勤总数失败: {e}"))
        })?;

        let records = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询考勤列表失败: {e}"))
        })?;

        Ok(AttendanceListResponse {
            items: records
                .into_iter()
                .map(|m| m.into_attendance_record())
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出考勤记录（用于汇总计算）
    pub async fn list_attendance_records_impl(
        &self,
        subject_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = AttendanceRecords::find();

        if let Some(subject_id) = subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let records = select
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询考勤记录失败: {e}"))
            })?;

        Ok(records
            .into_iter()
            .map(|m| m.into_attendance_record())
            .collect())
    }

    /// 修改单条考勤记录
    pub async fn update_attendance_record_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        let existing = AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询考勤记录失败: {e}"))
            })?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(note) = update.note {
            model.note = Set(Some(note));
        }

        let result = model.update(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("更新考勤记录失败: {e}"))
        })?;

        Ok(Some(result.into_attendance_record()))
    }

    /// 删除考勤记录
    pub async fn delete_attendance_record_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("删除考勤记录失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_subject, create_user, memory_storage};
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::attendance::requests::{AttendanceEntry, AttendanceListQuery};
    use crate::models::users::entities::UserRole;
    use chrono::NaiveDate;

    fn entry(student_id: i64, status: AttendanceStatus) -> AttendanceEntry {
        AttendanceEntry {
            student_id,
            status,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_record_per_day() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let student = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let subject = create_subject(&storage, teacher.id, "Historia", "5A").await;
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let first = storage
            .upsert_attendance_impl(
                subject.id,
                day,
                teacher.id,
                &[entry(student.id, AttendanceStatus::Absent)],
            )
            .await
            .unwrap();
        let second = storage
            .upsert_attendance_impl(
                subject.id,
                day,
                teacher.id,
                &[entry(student.id, AttendanceStatus::Late)],
            )
            .await
            .unwrap();

        assert_eq!(first[0].id, second[0].id);
        assert_eq!(second[0].status, AttendanceStatus::Late);

        let records = storage
            .list_attendance_records_impl(Some(subject.id), Some(student.id))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, day);
    }

    #[tokio::test]
    async fn test_list_attendance_by_date_range() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let student = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let subject = create_subject(&storage, teacher.id, "Historia", "5A").await;

        for d in [3, 10, 17] {
            storage
                .upsert_attendance_impl(
                    subject.id,
                    NaiveDate::from_ymd_opt(2025, 3, d).unwrap(),
                    teacher.id,
                    &[entry(student.id, AttendanceStatus::Present)],
                )
                .await
                .unwrap();
        }

        let page = storage
            .list_attendance_with_pagination_impl(AttendanceListQuery {
                subject_id: Some(subject.id),
                date_from: NaiveDate::from_ymd_opt(2025, 3, 5),
                date_to: NaiveDate::from_ymd_opt(2025, 3, 31),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 2);
        assert_eq!(
            page.items[0].date,
            NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()
        );
    }
}
