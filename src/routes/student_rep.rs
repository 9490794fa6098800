use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::student_rep::requests::{
    ClaimListParams, CreateClaimRequest, CreateRepEventRequest, RepEventListParams,
    RespondClaimRequest, UpdateRepEventRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StudentRepService;
use crate::utils::{SafeEventIdI64, SafeIDI64};

// 懒加载的全局 StudentRepService 实例
static STUDENT_REP_SERVICE: Lazy<StudentRepService> = Lazy::new(StudentRepService::new_lazy);

// 学生会活动
pub async fn list_events(
    req: HttpRequest,
    query: web::Query<RepEventListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE
        .list_events(&req, query.into_inner())
        .await
}

pub async fn create_event(
    req: HttpRequest,
    body: web::Json<CreateRepEventRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE
        .create_event(&req, body.into_inner())
        .await
}

pub async fn get_event(req: HttpRequest, path: SafeEventIdI64) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE.get_event(&req, path.0).await
}

pub async fn update_event(
    req: HttpRequest,
    path: SafeEventIdI64,
    body: web::Json<UpdateRepEventRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE
        .update_event(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_event(req: HttpRequest, path: SafeEventIdI64) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE.delete_event(&req, path.0).await
}

// 报名
pub async fn register(req: HttpRequest, path: SafeEventIdI64) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE.register(&req, path.0).await
}

pub async fn unregister(req: HttpRequest, path: SafeEventIdI64) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE.unregister(&req, path.0).await
}

pub async fn list_registrations(
    req: HttpRequest,
    path: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE.list_registrations(&req, path.0).await
}

// 投诉建议
pub async fn list_claims(
    req: HttpRequest,
    query: web::Query<ClaimListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE
        .list_claims(&req, query.into_inner())
        .await
}

pub async fn create_claim(
    req: HttpRequest,
    body: web::Json<CreateClaimRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE
        .create_claim(&req, body.into_inner())
        .await
}

pub async fn get_claim(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE.get_claim(&req, path.0).await
}

pub async fn respond_claim(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<RespondClaimRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_REP_SERVICE
        .respond_claim(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_student_rep_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student-rep")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/events")
                    .route(web::get().to(list_events))
                    .route(
                        web::post()
                            .to(create_event)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::student_rep_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/events/{event_id}")
                    .route(web::get().to(get_event))
                    .route(
                        web::put()
                            .to(update_event)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::student_rep_roles(),
                            )),
                    )
                    .route(
                        web::delete()
                            .to(delete_event)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::student_rep_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/events/{event_id}/registrations")
                    .route(
                        web::get()
                            .to(list_registrations)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::student_rep_roles(),
                            )),
                    )
                    .route(
                        web::post()
                            .to(register)
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    )
                    .route(
                        web::delete()
                            .to(unregister)
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    ),
            )
            .service(
                web::resource("/claims")
                    // 作者只能看到自己的（业务层过滤）
                    .route(web::get().to(list_claims))
                    .route(
                        web::post()
                            .to(create_claim)
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    ),
            )
            .service(web::resource("/claims/{id}").route(web::get().to(get_claim)))
            .service(
                web::resource("/claims/{id}/respond")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::claim_reviewer_roles(),
                    ))
                    .route(web::post().to(respond_claim)),
            ),
    );
}
