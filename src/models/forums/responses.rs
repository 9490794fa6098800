use serde::Serialize;
use ts_rs::TS;

use super::entities::{ForumReply, ForumThread};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forum.ts")]
pub struct ThreadListResponse {
    pub items: Vec<ForumThread>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/forum.ts")]
pub struct ThreadDetailResponse {
    pub thread: ForumThread,
    pub replies: Vec<ForumReply>,
}
