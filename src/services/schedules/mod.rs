pub mod conflicts;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schedules::requests::{
    CreateScheduleSlotRequest, ScheduleQueryParams, UpdateScheduleSlotRequest,
};
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
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

    // 当前用户可见的课表
    pub async fn get_timetable(
        &self,
        request: &HttpRequest,
        query: ScheduleQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::get_timetable(self, request, query).await
    }

    // 仅返回冲突
    pub async fn list_conflicts(
        &self,
        request: &HttpRequest,
        query: ScheduleQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_conflicts(self, request, query).await
    }

    pub async fn create_slot(
        &self,
        request: &HttpRequest,
        req: CreateScheduleSlotRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_slot(self, request, req).await
    }

    pub async fn update_slot(
        &self,
        request: &HttpRequest,
        slot_id: i64,
        update: UpdateScheduleSlotRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_slot(self, request, slot_id, update).await
    }

    pub async fn delete_slot(&self, request: &HttpRequest, slot_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_slot(self, request, slot_id).await
    }
}
