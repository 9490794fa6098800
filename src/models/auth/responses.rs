use crate::models::users::entities::{User, UserRole};
use serde::Serialize;
use ts_rs::TS;

/// 访问令牌，`expires_in` 以秒计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AccessToken {
    /// 配置里的有效期以分钟计
    pub fn bearer(access_token: String, expiry_minutes: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: expiry_minutes * 60,
        }
    }
}

// 登录成功：令牌 + 当前用户，refresh token 另外写在 Cookie 中
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub token: AccessToken,
    pub user: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshTokenResponse {
    #[serde(flatten)]
    pub token: AccessToken,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UserInfoResponse {
    pub user: User,
}

// 前端据此决定进入哪个角色的首页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
    pub user_id: i64,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_response_is_flat() {
        let json = serde_json::to_value(RefreshTokenResponse {
            token: AccessToken::bearer("abc".to_string(), 15),
        })
        .unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["expires_in"], 900);
        assert!(json.get("token").is_none());
    }
}
