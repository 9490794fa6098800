/*!
 * 请求频率限制
 *
 * 固定窗口计数：同一个身份（已登录用户按用户 ID，匿名请求按客户端 IP）
 * 在同一个窗口内的请求数超过上限后返回 429，直到窗口翻转。
 *
 * ```rust,ignore
 * web::scope("/api/v1/subjects/{subject_id}/attendance")
 *     .wrap(RateLimit::attendance()) // 每位教师每分钟 30 次点名提交
 *     .route("", web::post().to(record_attendance))
 * ```
 *
 * 不同预设使用不同的键前缀，互不占用额度。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

// 键里带窗口编号，过期时间只需覆盖最长的窗口
static WINDOW_COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(15 * 60))
        .max_capacity(100_000)
        .build()
});

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.max(1),
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：每个 IP 每分钟 5 次
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 自助注册：每个 IP 每分钟 3 次
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 点名提交：一节课可能要逐个修改，放宽到每分钟 30 次
    pub fn attendance() -> Self {
        Self::new(30, 60).with_prefix("attendance")
    }

    /// 论坛发帖和回复
    pub fn forum_post() -> Self {
        Self::new(10, 60).with_prefix("forum")
    }

    /// 仪表盘等聚合查询
    pub fn api() -> Self {
        Self::new(100, 60).with_prefix("api")
    }

    /// 当前窗口的编号和剩余秒数
    fn window_at(&self, unix_secs: u64) -> (u64, u64) {
        let index = unix_secs / self.window_secs;
        let remaining = self.window_secs - unix_secs % self.window_secs;
        (index, remaining)
    }

    fn counter_key(&self, identity: &str, window_index: u64) -> String {
        if self.key_prefix.is_empty() {
            format!("{identity}@{window_index}")
        } else {
            format!("{}:{identity}@{window_index}", self.key_prefix)
        }
    }
}

/// 匿名请求的身份：优先取连接地址，其次是代理转发头
///
/// 只接受能解析成 IP 的值，部署在反向代理后时需由代理覆盖 X-Forwarded-For
fn client_ip(req: &ServiceRequest) -> String {
    let peer = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());
    if let Some(ip) = peer.as_deref().and_then(parse_ip) {
        return ip;
    }

    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(parse_ip);
    let real_ip = || {
        req.headers()
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_ip)
    };

    forwarded
        .or_else(real_ip)
        .or(peer)
        .unwrap_or_else(|| "unknown".to_string())
}

fn parse_ip(raw: &str) -> Option<String> {
    raw.trim().parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

fn identity(req: &ServiceRequest) -> String {
    match req.extensions().get::<User>() {
        Some(user) => format!("user:{}", user.id),
        None => format!("ip:{}", client_ip(req)),
    }
}

fn too_many_requests(limit: u32, retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header((LIMIT_HEADER, limit.to_string()))
        .insert_header((REMAINING_HEADER, "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let now = chrono::Utc::now().timestamp().max(0) as u64;
            let (window_index, retry_after) = limit.window_at(now);
            let key = limit.counter_key(&identity(&req), window_index);

            let used = WINDOW_COUNTERS.get(&key).await.unwrap_or(0);
            if used >= limit.max_requests {
                warn!(
                    "Rate limit hit for {} ({}/{} in {}s window)",
                    key, used, limit.max_requests, limit.window_secs
                );
                let response = too_many_requests(limit.max_requests, retry_after);
                return Ok(req.into_response(response.map_into_right_body()));
            }
            WINDOW_COUNTERS.insert(key, used + 1).await;

            let mut res = srv.call(req).await?.map_into_left_body();
            let remaining = limit.max_requests - used - 1;
            let headers = res.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&limit.max_requests.to_string()) {
                headers.insert(HeaderName::from_static(LIMIT_HEADER), value);
            }
            if let Ok(value) = HeaderValue::from_str(&remaining.to_string()) {
                headers.insert(HeaderName::from_static(REMAINING_HEADER), value);
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    #[::core::prelude::v1::test]
    fn test_presets_use_separate_buckets() {
        let presets = [
            RateLimit::login(),
            RateLimit::register(),
            RateLimit::refresh_token(),
            RateLimit::attendance(),
            RateLimit::forum_post(),
            RateLimit::api(),
        ];
        let mut prefixes: Vec<&str> = presets.iter().map(|p| p.key_prefix.as_str()).collect();
        prefixes.sort();
        prefixes.dedup();
        assert_eq!(prefixes.len(), presets.len());

        assert_eq!(RateLimit::attendance().max_requests, 30);
        assert_eq!(RateLimit::register().max_requests, 3);
    }

    #[::core::prelude::v1::test]
    fn test_window_rollover() {
        let limit = RateLimit::new(3, 60).with_prefix("forum");
        assert_eq!(limit.window_at(120), (2, 60));
        assert_eq!(limit.window_at(179), (2, 1));
        assert_eq!(limit.window_at(180), (3, 60));

        // 窗口翻转后换一个计数键
        assert_ne!(
            limit.counter_key("user:7", 2),
            limit.counter_key("user:7", 3)
        );
        assert_eq!(limit.counter_key("user:7", 2), "forum:user:7@2");
    }

    #[::core::prelude::v1::test]
    fn test_zero_window_is_clamped() {
        let limit = RateLimit::new(1, 0);
        assert_eq!(limit.window_secs, 1);
        assert_eq!(limit.window_at(42), (42, 1));
    }

    #[actix_web::test]
    async fn test_requests_over_limit_get_429() {
        let app = test::init_service(
            App::new().service(
                web::resource("/forum")
                    .wrap(RateLimit::new(2, 3600).with_prefix("test-forum-429"))
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        for expected_remaining in ["1", "0"] {
            let req = test::TestRequest::post()
                .uri("/forum")
                .peer_addr("10.0.0.8:5000".parse().unwrap())
                .to_request();
            let res = test::call_service(&app, req).await;
            assert!(res.status().is_success());
            assert_eq!(
                res.headers().get(REMAINING_HEADER).unwrap(),
                expected_remaining
            );
        }

        let req = test::TestRequest::post()
            .uri("/forum")
            .peer_addr("10.0.0.8:5000".parse().unwrap())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(res.headers().contains_key("Retry-After"));

        let json: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(json["code"], ErrorCode::RateLimitExceeded as i32);

        // 另一个 IP 不受影响
        let req = test::TestRequest::post()
            .uri("/forum")
            .peer_addr("10.0.0.9:5000".parse().unwrap())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }
}
