use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lesson_plans::requests::{
    CreateLessonPlanRequest, LessonPlanListParams, ReviewLessonPlanRequest,
    UpdateLessonPlanRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LessonPlanService;
use crate::utils::SafeIDI64;

// 懒加载的全局 LessonPlanService 实例
static LESSON_PLAN_SERVICE: Lazy<LessonPlanService> = Lazy::new(LessonPlanService::new_lazy);

pub async fn list_plans(
    req: HttpRequest,
    query: web::Query<LessonPlanListParams>,
) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE.list_plans(&req, query.into_inner()).await
}

pub async fn create_plan(
    req: HttpRequest,
    body: web::Json<CreateLessonPlanRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE.create_plan(&req, body.into_inner()).await
}

pub async fn get_plan(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE.get_plan(&req, path.0).await
}

pub async fn update_plan(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateLessonPlanRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE
        .update_plan(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_plan(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE.delete_plan(&req, path.0).await
}

// 提交审核
pub async fn submit_plan(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE.submit_plan(&req, path.0).await
}

pub async fn review_plan(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ReviewLessonPlanRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE
        .review_plan(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_lesson_plan_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lesson-plans")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_plans))
                    .route(
                        web::post()
                            .to(create_plan)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_plan))
                    .route(web::put().to(update_plan))
                    .route(web::delete().to(delete_plan)),
            )
            .service(
                web::resource("/{id}/submit")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::post().to(submit_plan)),
            )
            .service(
                web::resource("/{id}/review")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::post().to(review_plan)),
            ),
    );
}
