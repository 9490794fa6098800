//! 日期与时间的存储格式
//!
//! 数据库中日期存为 `YYYY-MM-DD`，课表时间存为 `HH:MM`，均为字符串以兼容三种后端。

use chrono::{NaiveDate, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// 接受 `HH:MM`，也兼容秒数为零的 `HH:MM:SS`
///
/// 存储只保留到分钟，带非零秒数的时间会被拒绝，否则校验与入库的值不一致
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim();
    let time = NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("invalid time '{s}': {e}"))?;
    if time.second() != 0 || time.nanosecond() != 0 {
        return Err(format!("invalid time '{s}': seconds are not supported"));
    }
    Ok(time)
}

/// `HH:MM` 格式的 serde 适配
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s)
            .map_err(|_| serde::de::Error::custom(format!("invalid time '{s}', expected HH:MM")))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| {
                    crate::utils::time::parse_time(&s).map_err(|_| {
                        serde::de::Error::custom(format!("invalid time '{s}', expected HH:MM"))
                    })
                })
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "hhmm")]
        start: NaiveTime,
        #[serde(default, with = "hhmm::option")]
        end: Option<NaiveTime>,
    }

    #[test]
    fn test_hhmm_serde() {
        let slot: Slot = serde_json::from_str(r#"{"start": "08:30"}"#).unwrap();
        assert_eq!(slot.start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert!(slot.end.is_none());
        assert_eq!(
            serde_json::to_string(&slot).unwrap(),
            r#"{"start":"08:30","end":null}"#
        );
        assert!(serde_json::from_str::<Slot>(r#"{"start": "25:00"}"#).is_err());
    }

    #[test]
    fn test_parse_time_accepts_seconds() {
        assert_eq!(
            parse_time("13:45:00").unwrap(),
            NaiveTime::from_hms_opt(13, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_time_rejects_sub_minute_precision() {
        assert!(parse_time("09:00:10").is_err());
        assert!(parse_time("09:00:59").is_err());
        // 存储格式必须能原样解析回来
        let time = parse_time("09:05").unwrap();
        assert_eq!(parse_time(&format_time(time)).unwrap(), time);
    }

    #[test]
    fn test_date_round_trip() {
        let date = parse_date("2025-03-10").unwrap();
        assert_eq!(format_date(date), "2025-03-10");
        assert!(parse_date("10/03/2025").is_err());
    }
}
