use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::subject_students::{
    ActiveModel as SubjectStudentActiveModel, Column as SubjectStudentColumn,
    Entity as SubjectStudents,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::{EnrollStudentsResponse, SubjectListResponse},
    },
    users::entities::User,
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::normalize_course;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(
        &self,
        teacher_id: i64,
        req: CreateSubjectRequest,
    ) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();
        let course = normalize_course(&req.course)
            .ok_or_else(|| SchoolSystemError::validation("科目所属班级不能为空"))?;

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            course: Set(course),
            teacher_id: Set(teacher_id),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 通过名称和班级获取科目（用于唯一性检查）
    pub async fn get_subject_by_name_and_course_impl(
        &self,
        name: &str,
        course: &str,
    ) -> Result<Option<Subject>> {
        let Some(course) = normalize_course(course) else {
            return Ok(None);
        };

        let result = Subjects::find()
            .filter(Column::Name.eq(name.trim()))
            .filter(Column::Course.eq(course))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 构建科目查询条件
    async fn build_subject_select(&self, query: &SubjectListQuery) -> Result<Select<Subjects>> {
        let mut select = Subjects::find();

        if let Some(course) = query.course.as_deref().and_then(normalize_course) {
            select = select.filter(Column::Course.eq(course));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(student_id) = query.student_id {
            let ids = self.list_enrolled_subject_ids_impl(student_id).await?;
            select = select.filter(Column::Id.is_in(ids));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        Ok(select
            .order_by_asc(Column::Course)
            .order_by_asc(Column::Name))
    }

    /// 分页列出科目
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = normalize_page(query.page, query.size);
        let select = self.build_subject_select(&query).await?;

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询科目总数失败: {e}"))
        })?;

        let subjects = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询科目列表失败: {e}"))
        })?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出全部符合条件的科目（不分页）
    pub async fn list_all_subjects_impl(&self, query: SubjectListQuery) -> Result<Vec<Subject>> {
        let select = self.build_subject_select(&query).await?;

        let subjects = select.all(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询科目列表失败: {e}"))
        })?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let existing = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询科目失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        if let Some(course) = update.course.as_deref().and_then(normalize_course) {
            model.course = Set(course);
        }

        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新科目失败: {e}")))?;

        Ok(Some(result.into_subject()))
    }

    /// 删除科目（级联删除课程表、考勤、成绩等）
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量选课
    pub async fn enroll_students_impl(
        &self,
        subject_id: i64,
        student_ids: &[i64],
    ) -> Result<EnrollStudentsResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let mut enrolled = Vec::new();
        let mut skipped = Vec::new();
        let mut seen = HashSet::new();

        for &student_id in student_ids {
            // 请求中的重复 ID 同样视为已选
            if !seen.insert(student_id) {
                skipped.push(student_id);
                continue;
            }

            let existing = SubjectStudents::find()
                .filter(SubjectStudentColumn::SubjectId.eq(subject_id))
                .filter(SubjectStudentColumn::StudentId.eq(student_id))
                .one(&txn)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("查询选课记录失败: {e}"))
                })?;

            if existing.is_some() {
                skipped.push(student_id);
                continue;
            }

            let model = SubjectStudentActiveModel {
                subject_id: Set(subject_id),
                student_id: Set(student_id),
                enrolled_at: Set(now),
                ..Default::default()
            };

            let inserted = model.insert(&txn).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("创建选课记录失败: {e}"))
            })?;
            enrolled.push(inserted.into_subject_student());
        }

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(EnrollStudentsResponse { enrolled, skipped })
    }

    /// 退课
    pub async fn unenroll_student_impl(&self, subject_id: i64, student_id: i64) -> Result<bool> {
        let result = SubjectStudents::delete_many()
            .filter(SubjectStudentColumn::SubjectId.eq(subject_id))
            .filter(SubjectStudentColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生是否选修了该科目
    pub async fn is_student_enrolled_impl(&self, subject_id: i64, student_id: i64) -> Result<bool> {
        let count = SubjectStudents::find()
            .filter(SubjectStudentColumn::SubjectId.eq(subject_id))
            .filter(SubjectStudentColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出科目的全部学生
    pub async fn list_subject_students_impl(&self, subject_id: i64) -> Result<Vec<User>> {
        let student_ids: Vec<i64> = SubjectStudents::find()
            .select_only()
            .column(SubjectStudentColumn::StudentId)
            .filter(SubjectStudentColumn::SubjectId.eq(subject_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询选课学生失败: {e}")))?;

        self.get_users_by_ids_impl(&student_ids).await
    }

    /// 学生选修的科目 ID
    pub async fn list_enrolled_subject_ids_impl(&self, student_id: i64) -> Result<Vec<i64>> {
        SubjectStudents::find()
            .select_only()
            .column(SubjectStudentColumn::SubjectId)
            .filter(SubjectStudentColumn::StudentId.eq(student_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询选课科目失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_subject, create_user, memory_storage};
    use crate::models::subjects::requests::{SubjectListQuery, UpdateSubjectRequest};
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_subject_course_is_normalized() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let subject = create_subject(&storage, teacher.id, "Matemática", " 5a ").await;

        assert_eq!(subject.course, "5A");
        let found = storage
            .get_subject_by_name_and_course_impl("Matemática", "5A")
            .await
            .unwrap();
        assert_eq!(found.map(|s| s.id), Some(subject.id));
    }

    #[tokio::test]
    async fn test_enroll_skips_existing_and_duplicates() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let a = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let b = create_user(&storage, "alumno02", UserRole::Student, Some("5A")).await;
        let subject = create_subject(&storage, teacher.id, "Historia", "5A").await;

        let first = storage
            .enroll_students_impl(subject.id, &[a.id, a.id])
            .await
            .unwrap();
        assert_eq!(first.enrolled.len(), 1);
        assert_eq!(first.skipped, vec![a.id]);

        let second = storage
            .enroll_students_impl(subject.id, &[a.id, b.id])
            .await
            .unwrap();
        assert_eq!(second.enrolled.len(), 1);
        assert_eq!(second.skipped, vec![a.id]);

        let students = storage.list_subject_students_impl(subject.id).await.unwrap();
        assert_eq!(students.len(), 2);
        assert!(storage.is_student_enrolled_impl(subject.id, b.id).await.unwrap());

        assert!(storage.unenroll_student_impl(subject.id, b.id).await.unwrap());
        assert!(!storage.is_student_enrolled_impl(subject.id, b.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_subjects_for_student() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let student = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let math = create_subject(&storage, teacher.id, "Matemática", "5A").await;
        create_subject(&storage, teacher.id, "Lengua", "5A").await;

        storage
            .enroll_students_impl(math.id, &[student.id])
            .await
            .unwrap();

        let subjects = storage
            .list_all_subjects_impl(SubjectListQuery {
                student_id: Some(student.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].id, math.id);

        let all = storage
            .list_subjects_with_pagination_impl(SubjectListQuery {
                course: Some("5a".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_subject() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let subject = create_subject(&storage, teacher.id, "Química", "4B").await;

        let updated = storage
            .update_subject_impl(
                subject.id,
                UpdateSubjectRequest {
                    description: Some("Laboratorio".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("Laboratorio"));
        assert_eq!(updated.course, "4B");

        assert!(storage.delete_subject_impl(subject.id).await.unwrap());
        assert!(storage.get_subject_by_id_impl(subject.id).await.unwrap().is_none());
    }
}
