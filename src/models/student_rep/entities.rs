use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 学生会活动状态
    RepEventStatus, "../frontend/src/types/generated/student_rep.ts" {
        Open => "open",
        Closed => "closed",
        Cancelled => "cancelled",
    }
}

define_string_enum! {
    /// 申诉处理状态
    ClaimStatus, "../frontend/src/types/generated/student_rep.ts" {
        Pending => "pending",
        InReview => "in_review",
        Resolved => "resolved",
        Rejected => "rejected",
    }
}

impl ClaimStatus {
    /// 是否允许从当前状态流转到目标状态
    pub fn can_transition_to(&self, next: ClaimStatus) -> bool {
        matches!(
            (self, next),
            (
                ClaimStatus::Pending,
                ClaimStatus::InReview | ClaimStatus::Resolved | ClaimStatus::Rejected
            ) | (
                ClaimStatus::InReview,
                ClaimStatus::Resolved | ClaimStatus::Rejected
            )
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Resolved | ClaimStatus::Rejected)
    }
}

// 学生会活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct RepEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    /// 为空表示不限人数
    pub capacity: Option<i32>,
    pub status: RepEventStatus,
    pub created_by: i64,
    pub registered_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl RepEvent {
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|cap| self.registered_count >= i64::from(cap))
    }
}

// 活动报名记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct RepEventRegistration {
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

/// 报名结果，由存储层在同一事务内判断
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Registered(RepEventRegistration),
    EventNotFound,
    NotOpen,
    Full,
    AlreadyRegistered,
}

// 学生申诉（reclamo）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_rep.ts")]
pub struct Claim {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ClaimStatus,
    pub response: Option<String>,
    pub responded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_transitions() {
        assert!(ClaimStatus::Pending.can_transition_to(ClaimStatus::InReview));
        assert!(ClaimStatus::Pending.can_transition_to(ClaimStatus::Resolved));
        assert!(ClaimStatus::InReview.can_transition_to(ClaimStatus::Rejected));
        assert!(!ClaimStatus::InReview.can_transition_to(ClaimStatus::Pending));
        assert!(!ClaimStatus::Pending.can_transition_to(ClaimStatus::Pending));
    }

    #[test]
    fn test_terminal_claims_cannot_move() {
        for status in [ClaimStatus::Resolved, ClaimStatus::Rejected] {
            assert!(status.is_terminal());
            for next in ClaimStatus::ALL {
                assert!(!status.can_transition_to(*next));
            }
        }
    }

    #[test]
    fn test_event_capacity() {
        let mut event = RepEvent {
            id: 1,
            title: "Torneo".to_string(),
            description: None,
            location: None,
            starts_at: chrono::Utc::now(),
            capacity: Some(2),
            status: RepEventStatus::Open,
            created_by: 1,
            registered_count: 1,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert!(!event.is_full());
        event.registered_count = 2;
        assert!(event.is_full());
        event.capacity = None;
        assert!(!event.is_full());
    }
}
