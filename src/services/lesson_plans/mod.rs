pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod review;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lesson_plans::requests::{
    CreateLessonPlanRequest, LessonPlanListParams, ReviewLessonPlanRequest,
    UpdateLessonPlanRequest,
};
use crate::storage::Storage;

pub struct LessonPlanService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonPlanService {
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

    pub async fn list_plans(
        &self,
        request: &HttpRequest,
        query: LessonPlanListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_plans(self, request, query).await
    }

    pub async fn create_plan(
        &self,
        request: &HttpRequest,
        req: CreateLessonPlanRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_plan(self, request, req).await
    }

    pub async fn get_plan(&self, request: &HttpRequest, plan_id: i64) -> ActixResult<HttpResponse> {
        detail::get_plan(self, request, plan_id).await
    }

    pub async fn update_plan(
        &self,
        request: &HttpRequest,
        plan_id: i64,
        update: UpdateLessonPlanRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_plan(self, request, plan_id, update).await
    }

    pub async fn submit_plan(&self, request: &HttpRequest, plan_id: i64) -> ActixResult<HttpResponse> {
        review::submit_plan(self, request, plan_id).await
    }

    pub async fn review_plan(
        &self,
        request: &HttpRequest,
        plan_id: i64,
        req: ReviewLessonPlanRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_plan(self, request, plan_id, req).await
    }

    pub async fn delete_plan(&self, request: &HttpRequest, plan_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_plan(self, request, plan_id).await
    }
}
