//! 管理员维护账号：列表、建号、查看、修改、删除
//!
//! 学生自助注册走 `auth`，这里可以直接指定任意角色和所属班级。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone(),
        }
    }

    /// 按角色、状态、班级筛选
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    pub async fn create_user(
        &self,
        request: &HttpRequest,
        body: CreateUserRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, body, request).await
    }

    /// 账号详情，连同授课或选修的科目
    pub async fn get_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        body: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, body, request).await
    }

    /// 不能删除当前登录的管理员自己
    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }
}
