pub mod delete;
pub mod list;
pub mod record;
pub mod report;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSummaryParams, RecordAttendanceRequest,
    UpdateAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 点名
    pub async fn record_attendance(
        &self,
        request: &HttpRequest,
        req: RecordAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_attendance(self, request, req).await
    }

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    pub async fn update_record(
        &self,
        request: &HttpRequest,
        record_id: i64,
        update: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_record(self, request, record_id, update).await
    }

    pub async fn delete_record(
        &self,
        request: &HttpRequest,
        record_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_record(self, request, record_id).await
    }

    // 单个学生在单个科目的出勤汇总
    pub async fn get_summary(
        &self,
        request: &HttpRequest,
        query: AttendanceSummaryParams,
    ) -> ActixResult<HttpResponse> {
        report::get_summary(self, request, query).await
    }

    // 科目出勤报表
    pub async fn get_subject_report(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        report::get_subject_report(self, request, subject_id).await
    }
}
