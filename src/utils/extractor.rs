//! 路径参数提取器
//!
//! 解析失败时直接返回 400 和统一的响应体，避免 actix 默认的纯文本错误。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &'static str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Invalid path parameter '{param}': '{raw}'");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_id_extractors {
    ($($(#[$meta:meta])* $name:ident => $param:literal),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )+
    };
}

define_safe_id_extractors! {
    /// 通用的 `{id}`
    SafeIDI64 => "id",
    SafeSubjectIdI64 => "subject_id",
    SafeStudentIdI64 => "student_id",
    SafeThreadIdI64 => "thread_id",
    SafeReplyIdI64 => "reply_id",
    SafeEventIdI64 => "event_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_positive_id() {
        let (req, mut payload) = TestRequest::default()
            .param("subject_id", "12")
            .to_http_parts();
        let id = SafeSubjectIdI64::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(id, SafeSubjectIdI64(12));
    }

    #[actix_web::test]
    async fn test_rejects_non_numeric_and_zero() {
        for raw in ["abc", "0", "-3"] {
            let (req, mut payload) = TestRequest::default().param("id", raw).to_http_parts();
            let err = SafeIDI64::from_request(&req, &mut payload).await.unwrap_err();
            assert_eq!(
                err.error_response().status(),
                actix_web::http::StatusCode::BAD_REQUEST
            );
        }
    }
}
