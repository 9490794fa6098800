use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{Result, SchoolSystemError};
use crate::models::materials::{
    entities::{Material, normalize_category},
    requests::{CreateMaterialRequest, UpdateMaterialRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 添加教学资料
    pub async fn create_material_impl(
        &self,
        uploaded_by: i64,
        req: CreateMaterialRequest,
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            uploaded_by: Set(uploaded_by),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            category: Set(normalize_category(req.category.as_deref())),
            url: Set(req.url.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("添加资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出科目资料，按分类和标题排序
    pub async fn list_materials_impl(&self, subject_id: i64) -> Result<Vec<Material>> {
        let items = Materials::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::Category)
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_material()).collect())
    }

    /// 更新资料
    pub async fn update_material_impl(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        let existing = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询资料失败: {e}")))?;

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

        if let Some(category) = update.category {
            model.category = Set(normalize_category(Some(&category)));
        }

        if let Some(url) = update.url {
            model.url = Set(url.trim().to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新资料失败: {e}")))?;

        Ok(Some(result.into_material()))
    }

    /// 删除资料
    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_subject, create_user, memory_storage};
    use crate::models::materials::requests::CreateMaterialRequest;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_material_category_defaults_and_order() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let subject = create_subject(&storage, teacher.id, "Geografía", "5A").await;

        for (title, category) in [
            ("Mapa", None),
            ("Guía 2", Some(" Guías ")),
            ("Guía 1", Some("guías")),
        ] {
            storage
                .create_material_impl(
                    teacher.id,
                    CreateMaterialRequest {
                        subject_id: subject.id,
                        title: title.to_string(),
                        description: None,
                        category: category.map(str::to_string),
                        url: "https://example.org/doc.pdf".to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let items = storage.list_materials_impl(subject.id).await.unwrap();
        let listed: Vec<_> = items
            .iter()
            .map(|m| (m.category.as_str(), m.title.as_str()))
            .collect();
        assert_eq!(
            listed,
            vec![("guías", "Guía 1"), ("guías", "Guía 2"), ("other", "Mapa")]
        );
    }
}
