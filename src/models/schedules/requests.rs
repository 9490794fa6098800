use chrono::NaiveTime;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::Weekday;
use crate::utils::time::hhmm;

// 课程表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleQueryParams {
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub course: Option<String>,
}

// 创建课程时段请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct CreateScheduleSlotRequest {
    pub subject_id: i64,
    pub day_of_week: Weekday,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[ts(type = "string")]
    pub end_time: NaiveTime,
    pub classroom: Option<String>,
}

// 更新课程时段请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct UpdateScheduleSlotRequest {
    pub day_of_week: Option<Weekday>,
    #[serde(default, with = "hhmm::option")]
    #[ts(type = "string | null")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    #[ts(type = "string | null")]
    pub end_time: Option<NaiveTime>,
    pub classroom: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_times_are_minute_precision() {
        let req: CreateScheduleSlotRequest = serde_json::from_str(
            r#"{"subject_id":1,"day_of_week":"monday","start_time":"09:00:00","end_time":"10:30"}"#,
        )
        .unwrap();
        assert!(req.start_time < req.end_time);

        // 09:00:10 和 09:00:50 入库后都会变成 09:00，必须在解析时拒绝
        let err = serde_json::from_str::<CreateScheduleSlotRequest>(
            r#"{"subject_id":1,"day_of_week":"monday","start_time":"09:00:10","end_time":"09:00:50"}"#,
        );
        assert!(err.is_err());

        let err = serde_json::from_str::<UpdateScheduleSlotRequest>(r#"{"end_time":"11:15:30"}"#);
        assert!(err.is_err());
    }
}
