use super::SeaOrmStorage;
use crate::entity::lesson_plans::{ActiveModel, Column, Entity as LessonPlans};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    lesson_plans::{
        entities::{LessonPlan, LessonPlanStatus},
        requests::{CreateLessonPlanRequest, LessonPlanListQuery, UpdateLessonPlanRequest},
        responses::LessonPlanListResponse,
    },
};
use crate::utils::time::format_date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建教学计划（草稿）
    pub async fn create_lesson_plan_impl(
        &self,
        teacher_id: i64,
        req: CreateLessonPlanRequest,
    ) -> Result<LessonPlan> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            objectives: Set(req.objectives),
            content: Set(req.content),
            starts_on: Set(format_date(req.starts_on)),
            ends_on: Set(format_date(req.ends_on)),
            status: Set(LessonPlanStatus::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("创建教学计划失败: {e}"))
        })?;

        Ok(result.into_lesson_plan())
    }

    /// 通过 ID 获取教学计划
    pub async fn get_lesson_plan_by_id_impl(&self, id: i64) -> Result<Option<LessonPlan>> {
        let result = LessonPlans::find_by_id(id).one(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询教学计划失败: {e}"))
        })?;

        Ok(result.map(|m| m.into_lesson_plan()))
    }

    /// 分页列出教学计划
    pub async fn list_lesson_plans_with_pagination_impl(
        &self,
        query: LessonPlanListQuery,
    ) -> Result<LessonPlanListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = LessonPlans::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::StartsOn)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询教学计划总数失败: {e}"))
        })?;

        let plans = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询教学计划列表失败: {e}"))
        })?;

        Ok(LessonPlanListResponse {
            items: plans.into_iter().map(|m| m.into_lesson_plan()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 修改教学计划内容
    pub async fn update_lesson_plan_impl(
        &self,
        id: i64,
        update: UpdateLessonPlanRequest,
    ) -> Result<Option<LessonPlan>> {
        let existing = LessonPlans::find_by_id(id).one(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询教学计划失败: {e}"))
        })?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(objectives) = update.objectives {
            model.objectives = Set(Some(objectives));
        }

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(starts_on) = update.starts_on {
            model.starts_on = Set(format_date(starts_on));
        }

        if let Some(ends_on) = update.ends_on {
            model.ends_on = Set(format_date(ends_on));
        }

        let result = model.update(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("更新教学计划失败: {e}"))
        })?;

        Ok(Some(result.into_lesson_plan()))
    }

    /// 设置教学计划状态（提交 / 审核）
    pub async fn set_lesson_plan_status_impl(
        &self,
        id: i64,
        status: LessonPlanStatus,
        review_comment: Option<String>,
        reviewed_by: Option<i64>,
    ) -> Result<Option<LessonPlan>> {
        let existing = LessonPlans::find_by_id(id).one(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询教学计划失败: {e}"))
        })?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.status = Set(status.to_string());
        model.review_comment = Set(review_comment);
        model.reviewed_by = Set(reviewed_by);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("更新教学计划状态失败: {e}"))
        })?;

        Ok(Some(result.into_lesson_plan()))
    }

    /// 删除教学计划
    pub async fn delete_lesson_plan_impl(&self, id: i64) -> Result<bool> {
        let result = LessonPlans::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("删除教学计划失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_subject, create_user, memory_storage};
    use crate::models::lesson_plans::entities::LessonPlanStatus;
    use crate::models::lesson_plans::requests::{CreateLessonPlanRequest, LessonPlanListQuery};
    use crate::models::users::entities::UserRole;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_lesson_plan_review_flow() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let admin = create_user(&storage, "director", UserRole::Admin, None).await;
        let subject = create_subject(&storage, teacher.id, "Literatura", "5A").await;

        let plan = storage
            .create_lesson_plan_impl(
                teacher.id,
                CreateLessonPlanRequest {
                    subject_id: subject.id,
                    title: "Unidad 1".to_string(),
                    objectives: Some("Leer el Martín Fierro".to_string()),
                    content: "Lectura y análisis".to_string(),
                    starts_on: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                    ends_on: NaiveDate::from_ymd_opt(2025, 4, 11).unwrap(),
                },
            )
            .await
            .unwrap();
        assert_eq!(plan.status, LessonPlanStatus::Draft);

        storage
            .set_lesson_plan_status_impl(plan.id, LessonPlanStatus::Submitted, None, None)
            .await
            .unwrap();
        let reviewed = storage
            .set_lesson_plan_status_impl(
                plan.id,
                LessonPlanStatus::Rejected,
                Some("Agregar evaluación".to_string()),
                Some(admin.id),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.status, LessonPlanStatus::Rejected);
        assert_eq!(reviewed.reviewed_by, Some(admin.id));

        let rejected = storage
            .list_lesson_plans_with_pagination_impl(LessonPlanListQuery {
                teacher_id: Some(teacher.id),
                status: Some(LessonPlanStatus::Rejected),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rejected.pagination.total, 1);
    }
}
