use serde::Serialize;
use ts_rs::TS;

use super::entities::Material;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialGroup {
    pub category: String,
    pub items: Vec<Material>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialGroupsResponse {
    pub subject_id: i64,
    pub total: i64,
    pub groups: Vec<MaterialGroup>,
}
