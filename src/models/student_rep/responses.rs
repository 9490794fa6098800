use serde::Serialize;
use ts_rs::TS;

use super::entities::{Claim, RepEvent, RepEventRegistration};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserBrief;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct RepEventListResponse {
    pub items: Vec<RepEvent>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct RegistrationEntry {
    #[serde(flatten)]
    #[ts(flatten)]
    pub registration: RepEventRegistration,
    pub student: Option<UserBrief>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct RegistrationListResponse {
    pub event_id: i64,
    pub items: Vec<RegistrationEntry>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct ClaimListResponse {
    pub items: Vec<Claim>,
    pub pagination: PaginationInfo,
}
