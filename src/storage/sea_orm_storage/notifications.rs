//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    notifications::{
        entities::Notification, requests::CreateNotificationRequest,
        responses::NotificationListResponse,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    fn notification_active_model(req: CreateNotificationRequest, now: i64) -> ActiveModel {
        ActiveModel {
            user_id: Set(req.user_id),
            kind: Set(req.kind.to_string()),
            title: Set(req.title),
            content: Set(req.content),
            link: Set(req.link),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
    }

    /// 批量创建通知，返回写入条数
    pub async fn create_notifications_impl(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<u64> {
        if reqs.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = reqs.len() as u64;
        let models = reqs
            .into_iter()
            .map(|req| Self::notification_active_model(req, now));

        Notifications::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("批量创建通知失败: {e}"))
            })?;

        Ok(count)
    }

    /// 通过 ID 获取通知
    pub async fn get_notification_by_id_impl(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询通知失败: {e}")))?;

        Ok(result.map(|m| m.into_notification()))
    }

    /// 列出用户通知（分页）
    pub async fn list_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        page: i64,
        size: i64,
        unread_only: bool,
    ) -> Result<NotificationListResponse> {
        let (page, size) = normalize_page(Some(page), Some(size));

        let mut select = Notifications::find().filter(Column::UserId.eq(user_id));

        if unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询通知总数失败: {e}"))
        })?;

        let notifications = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询通知列表失败: {e}"))
        })?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 获取用户未读通知数量
    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询未读通知数量失败: {e}"))
            })?;

        Ok(count as i64)
    }

    /// 标记通知为已读
    pub async fn mark_notification_read_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("标记通知已读失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 标记用户所有通知为已读
    pub async fn mark_all_notifications_read_impl(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("标记全部通知已读失败: {e}"))
            })?;

        Ok(result.rows_affected as i64)
    }

    /// 删除通知
    pub async fn delete_notification_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_user, memory_storage};
    use crate::models::notifications::entities::NotificationKind;
    use crate::models::notifications::requests::CreateNotificationRequest;
    use crate::models::users::entities::UserRole;

    fn request(user_id: i64, title: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            user_id,
            kind: NotificationKind::Grade,
            title: title.to_string(),
            content: "Nueva nota cargada".to_string(),
            link: None,
        }
    }

    #[tokio::test]
    async fn test_unread_count_and_mark_all() {
        let storage = memory_storage().await;
        let student = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let other = create_user(&storage, "alumno02", UserRole::Student, Some("5A")).await;

        let inserted = storage
            .create_notifications_impl(vec![
                request(student.id, "Matemática"),
                request(student.id, "Historia"),
                request(other.id, "Lengua"),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(storage.create_notifications_impl(Vec::new()).await.unwrap(), 0);

        let unread = storage
            .list_notifications_with_pagination_impl(student.id, 1, 10, true)
            .await
            .unwrap();
        assert_eq!(unread.pagination.total, 2);
        let first = &unread.items[0];
        assert!(!first.is_read);
        assert!(storage.mark_notification_read_impl(first.id).await.unwrap());

        assert_eq!(
            storage.count_unread_notifications_impl(student.id).await.unwrap(),
            1
        );
        assert_eq!(
            storage.mark_all_notifications_read_impl(student.id).await.unwrap(),
            1
        );
        assert_eq!(
            storage.count_unread_notifications_impl(student.id).await.unwrap(),
            0
        );
        assert_eq!(
            storage.count_unread_notifications_impl(other.id).await.unwrap(),
            1
        );
    }
}
