//! 学生会：活动报名与申诉

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::claims::{
    ActiveModel as ClaimActiveModel, Column as ClaimColumn, Entity as Claims,
};
use crate::entity::rep_event_registrations::{
    ActiveModel as RegistrationActiveModel, Column as RegistrationColumn,
    Entity as RepEventRegistrations,
};
use crate::entity::rep_events::{ActiveModel, Column, Entity as RepEvents, Model as RepEventModel};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    student_rep::{
        entities::{
            Claim, ClaimStatus, RegistrationOutcome, RepEvent, RepEventRegistration,
            RepEventStatus,
        },
        requests::{
            ClaimListQuery, CreateClaimRequest, CreateRepEventRequest, UpdateRepEventRequest,
        },
        responses::{ClaimListResponse, RepEventListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

const DEFAULT_CLAIM_CATEGORY: &str = "general";

impl SeaOrmStorage {
    async fn count_registrations<C: ConnectionTrait>(conn: &C, event_id: i64) -> Result<i64> {
        let count = RepEventRegistrations::find()
            .filter(RegistrationColumn::EventId.eq(event_id))
            .count(conn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计报名人数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 为一批活动附加报名人数
    async fn attach_registration_counts(&self, models: Vec<RepEventModel>) -> Result<Vec<RepEvent>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let event_ids: Vec<i64> = RepEventRegistrations::find()
            .select_only()
            .column(RegistrationColumn::EventId)
            .filter(RegistrationColumn::EventId.is_in(ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计报名人数失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for id in event_ids {
            *counts.entry(id).or_default() += 1;
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let count = counts.get(&m.id).copied().unwrap_or(0);
                m.into_rep_event(count)
            })
            .collect())
    }

    /// 创建学生会活动
    pub async fn create_rep_event_impl(
        &self,
        created_by: i64,
        req: CreateRepEventRequest,
    ) -> Result<RepEvent> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            location: Set(req.location),
            starts_at: Set(req.starts_at.timestamp()),
            capacity: Set(req.capacity),
            status: Set(RepEventStatus::Open.to_string()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_rep_event(0))
    }

    /// 通过 ID 获取活动（含报名人数）
    pub async fn get_rep_event_by_id_impl(&self, id: i64) -> Result<Option<RepEvent>> {
        let result = RepEvents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询活动失败: {e}")))?;

        match result {
            Some(model) => {
                let count = Self::count_registrations(&self.db, id).await?;
                Ok(Some(model.into_rep_event(count)))
            }
            None => Ok(None),
        }
    }

    /// 分页列出活动，按开始时间排序
    pub async fn list_rep_events_with_pagination_impl(
        &self,
        page: i64,
        size: i64,
        status: Option<RepEventStatus>,
    ) -> Result<RepEventListResponse> {
        let (page, size) = normalize_page(Some(page), Some(size));

        let mut select = RepEvents::find();
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        select = select.order_by_asc(Column::StartsAt).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询活动总数失败: {e}"))
        })?;

        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询活动列表失败: {e}"))
        })?;

        Ok(RepEventListResponse {
            items: self.attach_registration_counts(models).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新活动
    pub async fn update_rep_event_impl(
        &self,
        id: i64,
        update: UpdateRepEventRequest,
    ) -> Result<Option<RepEvent>> {
        let existing = RepEvents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询活动失败: {e}")))?;

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

        if let Some(location) = update.location {
            model.location = Set(Some(location));
        }

        if let Some(starts_at) = update.starts_at {
            model.starts_at = Set(starts_at.timestamp());
        }

        if let Some(capacity) = update.capacity {
            // 0 表示取消人数限制
            model.capacity = Set((capacity > 0).then_some(capacity));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新活动失败: {e}")))?;

        let count = Self::count_registrations(&self.db, id).await?;
        Ok(Some(result.into_rep_event(count)))
    }

    /// 删除活动（报名记录级联删除）
    pub async fn delete_rep_event_impl(&self, id: i64) -> Result<bool> {
        let result = RepEvents::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 报名：状态、重复报名与名额检查在同一事务内完成
    pub async fn register_for_rep_event_impl(
        &self,
        event_id: i64,
        student_id: i64,
    ) -> Result<RegistrationOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let event = RepEvents::find_by_id(event_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询活动失败: {e}")))?;

        let Some(event) = event else {
            return Ok(RegistrationOutcome::EventNotFound);
        };

        if event.status != RepEventStatus::Open.as_str() {
            return Ok(RegistrationOutcome::NotOpen);
        }

        let existing = RepEventRegistrations::find()
            .filter(RegistrationColumn::EventId.eq(event_id))
            .filter(RegistrationColumn::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询报名记录失败: {e}")))?;

        if existing.is_some() {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        if let Some(capacity) = event.capacity {
            let count = Self::count_registrations(&txn, event_id).await?;
            if count >= i64::from(capacity) {
                return Ok(RegistrationOutcome::Full);
            }
        }

        let registration = RegistrationActiveModel {
            event_id: Set(event_id),
            student_id: Set(student_id),
            registered_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolSystemError::database_operation(format!("报名失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(RegistrationOutcome::Registered(
            registration.into_registration(),
        ))
    }

    /// 取消报名
    pub async fn unregister_from_rep_event_impl(
        &self,
        event_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let result = RepEventRegistrations::delete_many()
            .filter(RegistrationColumn::EventId.eq(event_id))
            .filter(RegistrationColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("取消报名失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出活动报名记录
    pub async fn list_rep_event_registrations_impl(
        &self,
        event_id: i64,
    ) -> Result<Vec<RepEventRegistration>> {
        let items = RepEventRegistrations::find()
            .filter(RegistrationColumn::EventId.eq(event_id))
            .order_by_asc(RegistrationColumn::RegisteredAt)
            .order_by_asc(RegistrationColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询报名记录失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_registration()).collect())
    }

    /// 提交申诉
    pub async fn create_claim_impl(&self, author_id: i64, req: CreateClaimRequest) -> Result<Claim> {
        let now = chrono::Utc::now().timestamp();
        let category = req
            .category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CLAIM_CATEGORY.to_string());

        let model = ClaimActiveModel {
            author_id: Set(author_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            category: Set(category),
            status: Set(ClaimStatus::Pending.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交申诉失败: {e}")))?;

        Ok(result.into_claim())
    }

    /// 通过 ID 获取申诉
    pub async fn get_claim_by_id_impl(&self, id: i64) -> Result<Option<Claim>> {
        let result = Claims::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询申诉失败: {e}")))?;

        Ok(result.map(|m| m.into_claim()))
    }

    /// 分页列出申诉
    pub async fn list_claims_with_pagination_impl(
        &self,
        query: ClaimListQuery,
    ) -> Result<ClaimListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Claims::find();

        if let Some(status) = query.status {
            select = select.filter(ClaimColumn::Status.eq(status.to_string()));
        }

        if let Some(author_id) = query.author_id {
            select = select.filter(ClaimColumn::AuthorId.eq(author_id));
        }

        select = select
            .order_by_desc(ClaimColumn::CreatedAt)
            .order_by_desc(ClaimColumn::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询申诉总数失败: {e}"))
        })?;

        let claims = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询申诉列表失败: {e}"))
        })?;

        Ok(ClaimListResponse {
            items: claims.into_iter().map(|m| m.into_claim()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 处理申诉
    pub async fn respond_claim_impl(
        &self,
        id: i64,
        status: ClaimStatus,
        response: Option<String>,
        responded_by: i64,
    ) -> Result<Option<Claim>> {
        let existing = Claims::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询申诉失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.status = Set(status.to_string());
        model.responded_by = Set(Some(responded_by));
        model.updated_at = Set(chrono::Utc::now().timestamp());
        if response.is_some() {
            model.response = Set(response);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("处理申诉失败: {e}")))?;

        Ok(Some(result.into_claim()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_user, memory_storage};
    use crate::models::student_rep::entities::{ClaimStatus, RegistrationOutcome, RepEventStatus};
    use crate::models::student_rep::requests::{
        ClaimListQuery, CreateClaimRequest, CreateRepEventRequest, UpdateRepEventRequest,
    };
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_registration_respects_capacity_and_status() {
        let storage = memory_storage().await;
        let rep = create_user(&storage, "delegado1", UserRole::StudentRep, Some("5A")).await;
        let a = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let b = create_user(&storage, "alumno02", UserRole::Student, Some("5A")).await;

        let event = storage
            .create_rep_event_impl(
                rep.id,
                CreateRepEventRequest {
                    title: "Torneo de fútbol".to_string(),
                    description: None,
                    location: Some("Patio".to_string()),
                    starts_at: chrono::Utc::now() + chrono::Duration::days(7),
                    capacity: Some(1),
                },
            )
            .await
            .unwrap();
        assert_eq!(event.status, RepEventStatus::Open);

        assert!(matches!(
            storage.register_for_rep_event_impl(event.id, a.id).await.unwrap(),
            RegistrationOutcome::Registered(_)
        ));
        assert!(matches!(
            storage.register_for_rep_event_impl(event.id, a.id).await.unwrap(),
            RegistrationOutcome::AlreadyRegistered
        ));
        assert!(matches!(
            storage.register_for_rep_event_impl(event.id, b.id).await.unwrap(),
            RegistrationOutcome::Full
        ));
        assert!(matches!(
            storage.register_for_rep_event_impl(9999, b.id).await.unwrap(),
            RegistrationOutcome::EventNotFound
        ));

        let fetched = storage.get_rep_event_by_id_impl(event.id).await.unwrap().unwrap();
        assert_eq!(fetched.registered_count, 1);
        assert!(fetched.is_full());

        storage
            .update_rep_event_impl(
                event.id,
                UpdateRepEventRequest {
                    status: Some(RepEventStatus::Closed),
                    capacity: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            storage.register_for_rep_event_impl(event.id, b.id).await.unwrap(),
            RegistrationOutcome::NotOpen
        ));

        assert!(storage.unregister_from_rep_event_impl(event.id, a.id).await.unwrap());
        let listed = storage
            .list_rep_events_with_pagination_impl(1, 10, None)
            .await
            .unwrap();
        assert_eq!(listed.items[0].registered_count, 0);
        assert_eq!(listed.items[0].capacity, None);
    }

    #[tokio::test]
    async fn test_claim_lifecycle() {
        let storage = memory_storage().await;
        let student = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let rep = create_user(&storage, "delegado1", UserRole::StudentRep, Some("5A")).await;

        let claim = storage
            .create_claim_impl(
                student.id,
                CreateClaimRequest {
                    title: "Calefacción".to_string(),
                    description: "El aula 4 no tiene calefacción".to_string(),
                    category: Some("  Infraestructura ".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.category, "infraestructura");

        let responded = storage
            .respond_claim_impl(
                claim.id,
                ClaimStatus::Resolved,
                Some("Se reparó".to_string()),
                rep.id,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(responded.status, ClaimStatus::Resolved);
        assert_eq!(responded.responded_by, Some(rep.id));

        let mine = storage
            .list_claims_with_pagination_impl(ClaimListQuery {
                author_id: Some(student.id),
                status: Some(ClaimStatus::Resolved),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.pagination.total, 1);
    }
}
