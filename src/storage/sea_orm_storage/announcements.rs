use super::SeaOrmStorage;
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
    common::pagination::normalize_page,
};
use crate::utils::validate::normalize_course;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 发布公告
    pub async fn create_announcement_impl(
        &self,
        author_id: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            author_id: Set(author_id),
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            audience: Set(req.audience.to_string()),
            course: Set(req.course.as_deref().and_then(normalize_course)),
            subject_id: Set(req.subject_id),
            pinned: Set(req.pinned),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("发布公告失败: {e}")))?;

        Ok(result.into_announcement())
    }

    /// 通过 ID 获取公告
    pub async fn get_announcement_by_id_impl(&self, id: i64) -> Result<Option<Announcement>> {
        let result = Announcements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(result.map(|m| m.into_announcement()))
    }

    /// 分页列出公告：置顶优先，其余按发布时间倒序
    pub async fn list_announcements_with_pagination_impl(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Announcements::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        // 受众可见性：作者本人，或受众匹配且班级匹配
        if let Some(audiences) = query.audiences {
            let mut visible = Condition::all().add(
                Column::Audience.is_in(audiences.iter().map(|a| a.to_string())),
            );

            if let Some(student_course) = query.student_course {
                visible = visible.add(match student_course {
                    Some(course) => Condition::any()
                        .add(Column::Course.is_null())
                        .add(Column::Course.eq(course)),
                    None => Condition::all().add(Column::Course.is_null()),
                });
            }

            let mut cond = Condition::any().add(visible);
            if let Some(author_id) = query.author_id {
                cond = cond.add(Column::AuthorId.eq(author_id));
            }
            select = select.filter(cond);
        }

        select = select
            .order_by_desc(Column::Pinned)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询公告总数失败: {e}"))
        })?;

        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("查询公告列表失败: {e}"))
        })?;

        Ok(AnnouncementListResponse {
            items: items.into_iter().map(|m| m.into_announcement()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新公告
    pub async fn update_announcement_impl(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        let existing = Announcements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询公告失败: {e}")))?;

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

        if let Some(audience) = update.audience {
            model.audience = Set(audience.to_string());
        }

        if let Some(course) = update.course {
            model.course = Set(normalize_course(&course));
        }

        if let Some(pinned) = update.pinned {
            model.pinned = Set(pinned);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新公告失败: {e}")))?;

        Ok(Some(result.into_announcement()))
    }

    /// 删除公告
    pub async fn delete_announcement_impl(&self, id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_user, memory_storage};
    use crate::models::announcements::entities::Audience;
    use crate::models::announcements::requests::{
        AnnouncementListQuery, CreateAnnouncementRequest,
    };
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_student_only_sees_matching_announcements() {
        let storage = memory_storage().await;
        let admin = create_user(&storage, "director", UserRole::Admin, None).await;
        let rep = create_user(&storage, "delegado1", UserRole::StudentRep, Some("5A")).await;

        for (title, audience, course, author) in [
            ("General", Audience::All, None, admin.id),
            ("Quinto A", Audience::Students, Some("5a"), admin.id),
            ("Cuarto B", Audience::Students, Some("4B"), admin.id),
            ("Docentes", Audience::Teachers, None, admin.id),
            ("Propio", Audience::Teachers, None, rep.id),
        ] {
            storage
                .create_announcement_impl(
                    author,
                    CreateAnnouncementRequest {
                        title: title.to_string(),
                        content: "...".to_string(),
                        audience,
                        course: course.map(str::to_string),
                        subject_id: None,
                        pinned: title == "Cuarto B",
                    },
                )
                .await
                .unwrap();
        }

        let visible = storage
            .list_announcements_with_pagination_impl(AnnouncementListQuery {
                audiences: Some(vec![Audience::All, Audience::Students]),
                student_course: Some(Some("5A".to_string())),
                author_id: Some(rep.id),
                ..Default::default()
            })
            .await
            .unwrap();
        let mut titles: Vec<_> = visible.items.iter().map(|a| a.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["General", "Propio", "Quinto A"]);

        let everything = storage
            .list_announcements_with_pagination_impl(AnnouncementListQuery::default())
            .await
            .unwrap();
        assert_eq!(everything.pagination.total, 5);
        assert_eq!(everything.items[0].title, "Cuarto B");
    }
}
