pub mod claims;
pub mod events;
pub mod registrations;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::student_rep::requests::{
    ClaimListParams, CreateClaimRequest, CreateRepEventRequest, RepEventListParams,
    RespondClaimRequest, UpdateRepEventRequest,
};
use crate::storage::Storage;

pub struct StudentRepService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentRepService {
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

    // 学生会活动
    pub async fn list_events(
        &self,
        request: &HttpRequest,
        query: RepEventListParams,
    ) -> ActixResult<HttpResponse> {
        events::list_events(self, request, query).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        req: CreateRepEventRequest,
    ) -> ActixResult<HttpResponse> {
        events::create_event(self, request, req).await
    }

    pub async fn get_event(&self, request: &HttpRequest, event_id: i64) -> ActixResult<HttpResponse> {
        events::get_event(self, request, event_id).await
    }

    pub async fn update_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
        update: UpdateRepEventRequest,
    ) -> ActixResult<HttpResponse> {
        events::update_event(self, request, event_id, update).await
    }

    pub async fn delete_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        events::delete_event(self, request, event_id).await
    }

    // 报名
    pub async fn register(&self, request: &HttpRequest, event_id: i64) -> ActixResult<HttpResponse> {
        registrations::register(self, request, event_id).await
    }

    pub async fn unregister(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        registrations::unregister(self, request, event_id).await
    }

    pub async fn list_registrations(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        registrations::list_registrations(self, request, event_id).await
    }

    // 申诉
    pub async fn create_claim(
        &self,
        request: &HttpRequest,
        req: CreateClaimRequest,
    ) -> ActixResult<HttpResponse> {
        claims::create_claim(self, request, req).await
    }

    pub async fn list_claims(
        &self,
        request: &HttpRequest,
        query: ClaimListParams,
    ) -> ActixResult<HttpResponse> {
        claims::list_claims(self, request, query).await
    }

    pub async fn get_claim(&self, request: &HttpRequest, claim_id: i64) -> ActixResult<HttpResponse> {
        claims::get_claim(self, request, claim_id).await
    }

    pub async fn respond_claim(
        &self,
        request: &HttpRequest,
        claim_id: i64,
        req: RespondClaimRequest,
    ) -> ActixResult<HttpResponse> {
        claims::respond_claim(self, request, claim_id, req).await
    }
}
