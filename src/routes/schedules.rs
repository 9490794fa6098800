use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schedules::requests::{
    CreateScheduleSlotRequest, ScheduleQueryParams, UpdateScheduleSlotRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ScheduleService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ScheduleService 实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn get_timetable(
    req: HttpRequest,
    query: web::Query<ScheduleQueryParams>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.get_timetable(&req, query.into_inner()).await
}

pub async fn list_conflicts(
    req: HttpRequest,
    query: web::Query<ScheduleQueryParams>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_conflicts(&req, query.into_inner()).await
}

pub async fn create_slot(
    req: HttpRequest,
    body: web::Json<CreateScheduleSlotRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.create_slot(&req, body.into_inner()).await
}

pub async fn update_slot(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateScheduleSlotRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_slot(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_slot(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_slot(&req, path.0).await
}

// 配置路由
pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 课表 - 业务层按角色决定可见科目
                    .route(web::get().to(get_timetable))
                    .route(
                        web::post()
                            .to(create_slot)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(web::resource("/conflicts").route(web::get().to(list_conflicts)))
            .service(
                web::resource("/{id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::put().to(update_slot))
                    .route(web::delete().to(delete_slot)),
            ),
    );
}
