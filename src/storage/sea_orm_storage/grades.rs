use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
};
use crate::utils::time::format_date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_grade_impl(&self, teacher_id: i64, req: CreateGradeRequest) -> Result<Grade> {
        let now = chrono::Utc::now();
        let graded_on = req.graded_on.unwrap_or_else(|| now.date_naive());

        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            student_id: Set(req.student_id),
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            kind: Set(req.kind.to_string()),
            score: Set(req.score),
            term: Set(req.term),
            comment: Set(req.comment),
            graded_on: Set(format_date(graded_on)),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("录入成绩失败: {e}")))?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出成绩
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Grades::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(ids) = query.subject_ids {
            select = select.filter(Column::SubjectId.is_in(ids));
        }

        if let Some(term) = query.term {
            select = select.filter(Column::Term.eq(term));
        }

        select = select
            .order_by_desc(Column::GradedOn)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询成绩总数失败: {e}"))
        })?;

        let grades = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询成绩列表失败: {e}"))
        })?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出成绩（用于汇总计算）
    pub async fn list_grades_impl(
        &self,
        subject_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<Grade>> {
        let mut select = Grades::find();

        if let Some(subject_id) = subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let grades = select
            .order_by_asc(Column::Term)
            .order_by_asc(Column::GradedOn)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 更新成绩
    pub async fn update_grade_impl(
        &self,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        let existing = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(kind) = update.kind {
            model.kind = Set(kind.to_string());
        }

        if let Some(score) = update.score {
            model.score = Set(score);
        }

        if let Some(term) = update.term {
            model.term = Set(term);
        }

        if let Some(comment) = update.comment {
            model.comment = Set(Some(comment));
        }

        if let Some(graded_on) = update.graded_on {
            model.graded_on = Set(format_date(graded_on));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(Some(result.into_grade()))
    }

    /// 删除成绩
    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_subject, create_user, memory_storage};
    use crate::models::grades::entities::GradeKind;
    use crate::models::grades::requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
    use crate::models::users::entities::UserRole;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_grade_crud_and_term_filter() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let student = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let subject = create_subject(&storage, teacher.id, "Biología", "5A").await;

        let mut ids = Vec::new();
        for (term, score) in [(1, 7.5), (1, 9.0), (2, 6.0)] {
            let grade = storage
                .create_grade_impl(
                    teacher.id,
                    CreateGradeRequest {
                        subject_id: subject.id,
                        student_id: student.id,
                        title: format!("Parcial {term}"),
                        kind: GradeKind::Exam,
                        score,
                        term,
                        comment: None,
                        graded_on: NaiveDate::from_ymd_opt(2025, 4, 1),
                    },
                )
                .await
                .unwrap();
            ids.push(grade.id);
        }

        let first_term = storage
            .list_grades_with_pagination_impl(GradeListQuery {
                student_id: Some(student.id),
                term: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(first_term.pagination.total, 2);

        let updated = storage
            .update_grade_impl(
                ids[2],
                UpdateGradeRequest {
                    score: Some(8.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.score, 8.0);
        assert_eq!(updated.teacher_id, teacher.id);

        assert!(storage.delete_grade_impl(ids[0]).await.unwrap());
        let remaining = storage
            .list_grades_impl(Some(subject.id), Some(student.id))
            .await
            .unwrap();
        assert_eq!(remaining.len(), 2);
    }
}
