use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::{AppStartTime, ApiResponse, system::SystemInfoResponse};

/// 系统名称、版本、运行环境与运行时长
pub async fn get_info(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 测试环境下可能没有注入启动时间，按当前时间处理
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or_else(chrono::Utc::now);
    let uptime_seconds = chrono::Utc::now()
        .signed_duration_since(started_at)
        .num_seconds()
        .max(0);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SystemInfoResponse {
            system_name: config.app.system_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: config.app.environment.clone(),
            started_at,
            uptime_seconds,
        },
        "System info retrieved successfully",
    )))
}
