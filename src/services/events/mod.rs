pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::events::requests::{CreateEventRequest, EventListQuery, UpdateEventRequest};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
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

    pub async fn list_events(
        &self,
        request: &HttpRequest,
        query: EventListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, request, query).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        req: CreateEventRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, request, req).await
    }

    pub async fn get_event(&self, request: &HttpRequest, event_id: i64) -> ActixResult<HttpResponse> {
        detail::get_event(self, request, event_id).await
    }

    pub async fn update_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
        update: UpdateEventRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, request, event_id, update).await
    }

    pub async fn delete_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_event(self, request, event_id).await
    }
}

/// 开始日期不能晚于结束日期
pub(crate) fn check_date_range(
    starts_on: chrono::NaiveDate,
    ends_on: chrono::NaiveDate,
) -> Result<(), String> {
    if starts_on > ends_on {
        return Err(format!(
            "starts_on ({starts_on}) must not be after ends_on ({ends_on})"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_check_date_range() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
        assert!(check_date_range(d(20), d(20)).is_ok());
        assert!(check_date_range(d(20), d(25)).is_ok());
        assert!(check_date_range(d(25), d(20)).is_err());
    }
}
