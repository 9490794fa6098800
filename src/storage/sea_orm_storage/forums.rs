use super::SeaOrmStorage;
use crate::entity::forum_replies::{
    ActiveModel as ReplyActiveModel, Column as ReplyColumn, Entity as ForumReplies,
};
use crate::entity::forum_threads::{ActiveModel, Column, Entity as ForumThreads};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    forums::{
        entities::{ForumReply, ForumThread},
        requests::{CreateThreadRequest, ThreadListQuery, UpdateThreadRequest},
        responses::ThreadListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建主题
    pub async fn create_thread_impl(
        &self,
        author_id: i64,
        req: CreateThreadRequest,
    ) -> Result<ForumThread> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            author_id: Set(author_id),
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            pinned: Set(false),
            locked: Set(false),
            reply_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            last_activity_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建主题失败: {e}")))?;

        Ok(result.into_thread())
    }

    /// 通过 ID 获取主题
    pub async fn get_thread_by_id_impl(&self, id: i64) -> Result<Option<ForumThread>> {
        let result = ForumThreads::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询主题失败: {e}")))?;

        Ok(result.map(|m| m.into_thread()))
    }

    /// 分页列出主题：置顶优先，其余按最后活动时间倒序
    pub async fn list_threads_with_pagination_impl(
        &self,
        query: ThreadListQuery,
    ) -> Result<ThreadListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = ForumThreads::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(ids) = query.visible_subject_ids {
            select = select.filter(
                Condition::any()
                    .add(Column::SubjectId.is_null())
                    .add(Column::SubjectId.is_in(ids)),
            );
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Content.contains(&escaped)),
            );
        }

        select = select
            .order_by_desc(Column::Pinned)
            .order_by_desc(Column::LastActivityAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询主题总数失败: {e}"))
        })?;

        let threads = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询主题列表失败: {e}"))
        })?;

        Ok(ThreadListResponse {
            items: threads.into_iter().map(|m| m.into_thread()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新主题
    pub async fn update_thread_impl(
        &self,
        id: i64,
        update: UpdateThreadRequest,
    ) -> Result<Option<ForumThread>> {
        let existing = ForumThreads::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询主题失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(pinned) = update.pinned {
            model.pinned = Set(pinned);
        }

        if let Some(locked) = update.locked {
            model.locked = Set(locked);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新主题失败: {e}")))?;

        Ok(Some(result.into_thread()))
    }

    /// 删除主题（回复级联删除）
    pub async fn delete_thread_impl(&self, id: i64) -> Result<bool> {
        let result = ForumThreads::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除主题失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 重新统计主题回复数，可选刷新最后活动时间
    async fn refresh_thread_counters<C: ConnectionTrait>(
        conn: &C,
        thread_id: i64,
        touched_at: Option<i64>,
    ) -> Result<()> {
        let count = ForumReplies::find()
            .filter(ReplyColumn::ThreadId.eq(thread_id))
            .count(conn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计回复数失败: {e}")))?;

        let mut model = ActiveModel {
            id: Set(thread_id),
            reply_count: Set(count as i32),
            ..Default::default()
        };
        if let Some(ts) = touched_at {
            model.last_activity_at = Set(ts);
        }

        model
            .update(conn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新主题统计失败: {e}")))?;

        Ok(())
    }

    /// 发表回复
    pub async fn create_reply_impl(
        &self,
        thread_id: i64,
        author_id: i64,
        content: String,
    ) -> Result<ForumReply> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        let reply = ReplyActiveModel {
            thread_id: Set(thread_id),
            author_id: Set(author_id),
            content: Set(content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolSystemError::database_operation(format!("发表回复失败: {e}")))?;

        Self::refresh_thread_counters(&txn, thread_id, Some(now)).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(reply.into_reply())
    }

    /// 通过 ID 获取回复
    pub async fn get_reply_by_id_impl(&self, id: i64) -> Result<Option<ForumReply>> {
        let result = ForumReplies::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询回复失败: {e}")))?;

        Ok(result.map(|m| m.into_reply()))
    }

    /// 按时间顺序列出主题的回复
    pub async fn list_replies_impl(&self, thread_id: i64) -> Result<Vec<ForumReply>> {
        let replies = ForumReplies::find()
            .filter(ReplyColumn::ThreadId.eq(thread_id))
            .order_by_asc(ReplyColumn::CreatedAt)
            .order_by_asc(ReplyColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询回复失败: {e}")))?;

        Ok(replies.into_iter().map(|m| m.into_reply()).collect())
    }

    /// 删除回复并刷新回复数
    pub async fn delete_reply_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = ForumReplies::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询回复失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        ForumReplies::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除回复失败: {e}")))?;

        Self::refresh_thread_counters(&txn, existing.thread_id, None).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_subject, create_user, memory_storage};
    use crate::models::forums::requests::{
        CreateThreadRequest, ThreadListQuery, UpdateThreadRequest,
    };
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_replies_update_thread_counters() {
        let storage = memory_storage().await;
        let author = create_user(&storage, "alumno01", UserRole::Student, Some("5A")).await;
        let thread = storage
            .create_thread_impl(
                author.id,
                CreateThreadRequest {
                    subject_id: None,
                    title: "Viaje de egresados".to_string(),
                    content: "¿Quién se anota?".to_string(),
                },
            )
            .await
            .unwrap();

        let first = storage
            .create_reply_impl(thread.id, author.id, "Yo".to_string())
            .await
            .unwrap();
        storage
            .create_reply_impl(thread.id, author.id, "Yo también".to_string())
            .await
            .unwrap();

        let refreshed = storage.get_thread_by_id_impl(thread.id).await.unwrap().unwrap();
        assert_eq!(refreshed.reply_count, 2);
        assert!(refreshed.last_activity_at >= thread.last_activity_at);

        assert!(storage.delete_reply_impl(first.id).await.unwrap());
        assert!(!storage.delete_reply_impl(first.id).await.unwrap());
        let refreshed = storage.get_thread_by_id_impl(thread.id).await.unwrap().unwrap();
        assert_eq!(refreshed.reply_count, 1);
        assert_eq!(storage.list_replies_impl(thread.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_thread_visibility_and_pinning() {
        let storage = memory_storage().await;
        let teacher = create_user(&storage, "profesor1", UserRole::Teacher, None).await;
        let math = create_subject(&storage, teacher.id, "Matemática", "5A").await;
        let art = create_subject(&storage, teacher.id, "Arte", "4B").await;

        let mut ids = Vec::new();
        for subject_id in [None, Some(math.id), Some(art.id)] {
            let thread = storage
                .create_thread_impl(
                    teacher.id,
                    CreateThreadRequest {
                        subject_id,
                        title: format!("Tema {subject_id:?}"),
                        content: "Contenido".to_string(),
                    },
                )
                .await
                .unwrap();
            ids.push(thread.id);
        }

        storage
            .update_thread_impl(
                ids[0],
                UpdateThreadRequest {
                    pinned: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let visible = storage
            .list_threads_with_pagination_impl(ThreadListQuery {
                visible_subject_ids: Some(vec![math.id]),
                ..Default::default()
            })
            .await
            .unwrap();
        let visible_ids: Vec<_> = visible.items.iter().map(|t| t.id).collect();
        assert_eq!(visible_ids, vec![ids[0], ids[1]]);
    }
}
