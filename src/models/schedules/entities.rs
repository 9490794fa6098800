use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::time::hhmm;

define_string_enum! {
    /// 星期，数据库中以 1（周一）到 7（周日）存储
    Weekday, "../frontend/src/types/generated/schedule.ts" {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
        Sunday => "sunday",
    }
}

impl Weekday {
    pub fn number(&self) -> i32 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    pub fn from_number(n: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.number() == n)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

define_string_enum! {
    /// 课程冲突原因
    ConflictReason, "../frontend/src/types/generated/schedule.ts" {
        SameSubject => "same_subject",
        SameTeacher => "same_teacher",
        SameCourse => "same_course",
        SameClassroom => "same_classroom",
    }
}

// 每周课程时段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleSlot {
    pub id: i64,
    pub subject_id: i64,
    pub day_of_week: Weekday,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub end_time: NaiveTime,
    pub classroom: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 两个时段之间的冲突
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleConflict {
    pub first_slot_id: i64,
    pub second_slot_id: i64,
    pub day_of_week: Weekday,
    pub reason: ConflictReason,
}
