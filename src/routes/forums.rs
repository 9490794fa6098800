use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::forums::requests::{
    CreateReplyRequest, CreateThreadRequest, ThreadListParams, UpdateThreadRequest,
};
use crate::services::ForumService;
use crate::utils::{SafeReplyIdI64, SafeThreadIdI64};

// 懒加载的全局 ForumService 实例
static FORUM_SERVICE: Lazy<ForumService> = Lazy::new(ForumService::new_lazy);

pub async fn list_threads(
    req: HttpRequest,
    query: web::Query<ThreadListParams>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.list_threads(&req, query.into_inner()).await
}

pub async fn create_thread(
    req: HttpRequest,
    body: web::Json<CreateThreadRequest>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.create_thread(&req, body.into_inner()).await
}

// 帖子详情（含回复）
pub async fn get_thread(req: HttpRequest, path: SafeThreadIdI64) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.get_thread(&req, path.0).await
}

pub async fn update_thread(
    req: HttpRequest,
    path: SafeThreadIdI64,
    body: web::Json<UpdateThreadRequest>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE
        .update_thread(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_thread(req: HttpRequest, path: SafeThreadIdI64) -> ActixResult<HttpResponse> {
    FORUM_SERVICE.delete_thread(&req, path.0).await
}

pub async fn create_reply(
    req: HttpRequest,
    path: SafeThreadIdI64,
    body: web::Json<CreateReplyRequest>,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE
        .create_reply(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_reply(
    req: HttpRequest,
    thread_id: SafeThreadIdI64,
    reply_id: SafeReplyIdI64,
) -> ActixResult<HttpResponse> {
    FORUM_SERVICE
        .delete_reply(&req, thread_id.0, reply_id.0)
        .await
}

// 配置路由
pub fn configure_forum_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/forums/threads")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_threads))
                    .route(web::post().to(create_thread).wrap(RateLimit::forum_post())),
            )
            .service(
                web::resource("/{thread_id}")
                    .route(web::get().to(get_thread))
                    .route(web::put().to(update_thread))
                    .route(web::delete().to(delete_thread)),
            )
            .service(
                web::resource("/{thread_id}/replies")
                    .route(web::post().to(create_reply).wrap(RateLimit::forum_post())),
            )
            .service(
                web::resource("/{thread_id}/replies/{reply_id}")
                    .route(web::delete().to(delete_reply)),
            ),
    );
}
