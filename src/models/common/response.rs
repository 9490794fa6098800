//! 所有接口共用的响应外壳 `{ code, message, data?, timestamp }`
//!
//! `code` 为 0 表示成功，其余取值见 [`ErrorCode`]。错误响应也可以带 `data`，
//! 例如课表冲突时返回冲突列表。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn envelope(code: ErrorCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::envelope(ErrorCode::Success, Some(data), message)
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self::envelope(code, Some(data), message)
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::envelope(ErrorCode::Success, None, message)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::envelope(code, None, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))
        .unwrap();
        assert_eq!(json["code"], ErrorCode::SubjectNotFound as i32);
        assert_eq!(json["message"], "Subject not found");
        assert!(json.get("data").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_can_carry_data() {
        let json = serde_json::to_value(ApiResponse::error(
            ErrorCode::ScheduleConflict,
            vec![3_i64, 9],
            "conflicts",
        ))
        .unwrap();
        assert_eq!(json["code"], ErrorCode::ScheduleConflict as i32);
        assert_eq!(json["data"], serde_json::json!([3, 9]));

        let ok = ApiResponse::success_empty("Enrolled");
        assert_eq!(ok.code, 0);
        assert!(ok.data.is_none());
    }
}
