//! 出勤率计算
//!
//! `absences = absent + late × late_absence_weight`，请假（justified）不计入缺勤；
//! `attendance_percentage = 100 × (total − absences) / total`，保留两位小数，没有记录时为 100。

use std::collections::BTreeMap;

use crate::config::SchoolConfig;
use crate::models::attendance::entities::{
    AttendanceRecord, AttendanceStanding, AttendanceStatus, AttendanceSummary,
};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn standing_for(percentage: f64, rules: &SchoolConfig) -> AttendanceStanding {
    if percentage < rules.min_attendance_percentage {
        AttendanceStanding::Libre
    } else if percentage < rules.min_attendance_percentage + rules.at_risk_margin {
        AttendanceStanding::AtRisk
    } else {
        AttendanceStanding::Regular
    }
}

/// 汇总某学生在某科目的出勤，其余学生或科目的记录会被忽略
pub fn summarize(
    student_id: i64,
    subject_id: i64,
    records: &[AttendanceRecord],
    rules: &SchoolConfig,
) -> AttendanceSummary {
    let (mut present, mut absent, mut late, mut justified) = (0i64, 0i64, 0i64, 0i64);
    for record in records
        .iter()
        .filter(|r| r.student_id == student_id && r.subject_id == subject_id)
    {
        match record.status {
            AttendanceStatus::Present => present += 1,
            AttendanceStatus::Absent => absent += 1,
            AttendanceStatus::Late => late += 1,
            AttendanceStatus::Justified => justified += 1,
        }
    }

    let total = present + absent + late + justified;
    let absences = absent as f64 + late as f64 * rules.late_absence_weight;
    let attendance_percentage = if total == 0 {
        100.0
    } else {
        round2((100.0 * (total as f64 - absences) / total as f64).max(0.0))
    };

    AttendanceSummary {
        student_id,
        subject_id,
        total,
        present,
        absent,
        late,
        justified,
        absences: round2(absences),
        attendance_percentage,
        standing: standing_for(attendance_percentage, rules),
    }
}

/// 为每个学生生成一份汇总，保持传入顺序
pub fn summarize_students(
    subject_id: i64,
    student_ids: &[i64],
    records: &[AttendanceRecord],
    rules: &SchoolConfig,
) -> Vec<AttendanceSummary> {
    student_ids
        .iter()
        .map(|student_id| summarize(*student_id, subject_id, records, rules))
        .collect()
}

/// 按 (学生, 科目) 分组汇总所有记录，只返回非 regular 的结果
pub fn flagged_summaries(
    records: &[AttendanceRecord],
    rules: &SchoolConfig,
) -> Vec<AttendanceSummary> {
    let mut groups: BTreeMap<(i64, i64), Vec<AttendanceRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.student_id, record.subject_id))
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .map(|((student_id, subject_id), records)| {
            summarize(student_id, subject_id, &records, rules)
        })
        .filter(|summary| summary.standing != AttendanceStanding::Regular)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, student_id: i64, subject_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id,
            subject_id,
            student_id,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(id as u64),
            status,
            note: None,
            recorded_by: 1,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn records(student_id: i64, subject_id: i64, statuses: &[AttendanceStatus]) -> Vec<AttendanceRecord> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| record(i as i64, student_id, subject_id, *status))
            .collect()
    }

    #[test]
    fn test_no_records_is_full_attendance() {
        let summary = summarize(1, 1, &[], &SchoolConfig::default());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.attendance_percentage, 100.0);
        assert_eq!(summary.standing, AttendanceStanding::Regular);
    }

    #[test]
    fn test_percentage_with_absences() {
        use AttendanceStatus::*;
        // 8 次出勤、2 次缺勤 => 80%
        let mut statuses = vec![Present; 8];
        statuses.extend([Absent, Absent]);
        let summary = summarize(1, 7, &records(1, 7, &statuses), &SchoolConfig::default());
        assert_eq!(summary.present, 8);
        assert_eq!(summary.absent, 2);
        assert_eq!(summary.attendance_percentage, 80.0);
        // 恰好等于 最低线 + 余量 时不算预警
        assert_eq!(summary.standing, AttendanceStanding::Regular);

        // 7 次出勤、2 次缺勤 => 77.78%，落在 75 与 80 之间
        let mut statuses = vec![Present; 7];
        statuses.extend([Absent, Absent]);
        let summary = summarize(1, 7, &records(1, 7, &statuses), &SchoolConfig::default());
        assert_eq!(summary.attendance_percentage, 77.78);
        assert_eq!(summary.standing, AttendanceStanding::AtRisk);
    }

    #[test]
    fn test_late_counts_half_and_justified_does_not_count() {
        use AttendanceStatus::*;
        let statuses = [Present, Late, Late, Justified];
        let summary = summarize(1, 7, &records(1, 7, &statuses), &SchoolConfig::default());
        assert_eq!(summary.absences, 1.0);
        assert_eq!(summary.attendance_percentage, 75.0);
        assert_eq!(summary.standing, AttendanceStanding::AtRisk);
    }

    #[test]
    fn test_libre_below_minimum() {
        use AttendanceStatus::*;
        let statuses = [Present, Absent, Absent];
        let summary = summarize(1, 7, &records(1, 7, &statuses), &SchoolConfig::default());
        assert_eq!(summary.attendance_percentage, 33.33);
        assert_eq!(summary.standing, AttendanceStanding::Libre);
    }

    #[test]
    fn test_other_students_and_subjects_are_ignored() {
        use AttendanceStatus::*;
        let mut all = records(1, 7, &[Present, Present]);
        all.extend(records(2, 7, &[Absent]));
        all.extend(records(1, 8, &[Absent]));
        let summary = summarize(1, 7, &all, &SchoolConfig::default());
        assert_eq!(summary.total, 2);
        assert_eq!(summary.attendance_percentage, 100.0);
    }

    #[test]
    fn test_flagged_summaries_skip_regular_students() {
        use AttendanceStatus::*;
        let mut all = records(1, 7, &[Present, Present, Present, Present]);
        all.extend(records(2, 7, &[Present, Absent]));
        all.extend(records(3, 8, &[Absent]));
        let flagged = flagged_summaries(&all, &SchoolConfig::default());
        let keys: Vec<(i64, i64)> = flagged.iter().map(|s| (s.student_id, s.subject_id)).collect();
        assert_eq!(keys, vec![(2, 7), (3, 8)]);
        assert!(flagged.iter().all(|s| s.standing == AttendanceStanding::Libre));
    }

    #[test]
    fn test_standing_thresholds_follow_config() {
        let rules = SchoolConfig {
            min_attendance_percentage: 80.0,
            at_risk_margin: 10.0,
            ..SchoolConfig::default()
        };
        assert_eq!(standing_for(79.99, &rules), AttendanceStanding::Libre);
        assert_eq!(standing_for(80.0, &rules), AttendanceStanding::AtRisk);
        assert_eq!(standing_for(90.0, &rules), AttendanceStanding::Regular);
    }
}
