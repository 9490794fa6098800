use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_MATERIAL_CATEGORY: &str = "other";

// 教学资料（以链接形式保存）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub subject_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 规范化资料分类：去除首尾空白并转小写，空值归为 "other"
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_lowercase(),
        _ => DEFAULT_MATERIAL_CATEGORY.to_string(),
    }
}
