pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod replies;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::forums::requests::{
    CreateReplyRequest, CreateThreadRequest, ThreadListParams, UpdateThreadRequest,
};
use crate::storage::Storage;

pub struct ForumService {
    storage: Option<Arc<dyn Storage>>,
}

impl ForumService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_threads(
        &self,
        request: &HttpRequest,
        query: ThreadListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_threads(self, request, query).await
    }

    pub async fn create_thread(
        &self,
        request: &HttpRequest,
        req: CreateThreadRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_thread(self, request, req).await
    }

    pub async fn get_thread(
        &self,
        request: &HttpRequest,
        thread_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_thread(self, request, thread_id).await
    }

    pub async fn update_thread(
        &self,
        request: &HttpRequest,
        thread_id: i64,
        update: UpdateThreadRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_thread(self, request, thread_id, update).await
    }

    pub async fn delete_thread(
        &self,
        request: &HttpRequest,
        thread_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_thread(self, request, thread_id).await
    }

    pub async fn create_reply(
        &self,
        request: &HttpRequest,
        thread_id: i64,
        req: CreateReplyRequest,
    ) -> ActixResult<HttpResponse> {
        replies::create_reply(self, request, thread_id, req).await
    }

    pub async fn delete_reply(
        &self,
        request: &HttpRequest,
        thread_id: i64,
        reply_id: i64,
    ) -> ActixResult<HttpResponse> {
        replies::delete_reply(self, request, thread_id, reply_id).await
    }
}
