//! 每周课表冲突检测
//!
//! 两个时段在同一天且时间区间相交（首尾相接不算）时才可能冲突，
//! 冲突原因按 同一科目 → 同一教师 → 同一班级 → 同一教室 的顺序取第一个。

use crate::models::schedules::entities::{ConflictReason, ScheduleConflict, ScheduleSlot};
use crate::models::schedules::responses::ScheduleSlotView;
use crate::models::subjects::entities::Subject;

/// 时段与其所属科目
#[derive(Debug, Clone, Copy)]
pub struct PlacedSlot<'a> {
    pub slot: &'a ScheduleSlot,
    pub subject: &'a Subject,
}

/// 同一天且 `a.start < b.end && b.start < a.end`
pub fn overlaps(a: &ScheduleSlot, b: &ScheduleSlot) -> bool {
    a.day_of_week == b.day_of_week && a.start_time < b.end_time && b.start_time < a.end_time
}

fn same_classroom(a: &ScheduleSlot, b: &ScheduleSlot) -> bool {
    match (a.classroom.as_deref(), b.classroom.as_deref()) {
        (Some(x), Some(y)) => {
            let (x, y) = (x.trim(), y.trim());
            !x.is_empty() && x.eq_ignore_ascii_case(y)
        }
        _ => false,
    }
}

pub fn conflict_reason(a: PlacedSlot<'_>, b: PlacedSlot<'_>) -> Option<ConflictReason> {
    if !overlaps(a.slot, b.slot) {
        return None;
    }
    if a.subject.id == b.subject.id {
        Some(ConflictReason::SameSubject)
    } else if a.subject.teacher_id == b.subject.teacher_id {
        Some(ConflictReason::SameTeacher)
    } else if a.subject.course == b.subject.course {
        Some(ConflictReason::SameCourse)
    } else if same_classroom(a.slot, b.slot) {
        Some(ConflictReason::SameClassroom)
    } else {
        None
    }
}

/// 两两比较，每一对只报告一次
pub fn detect_conflicts(slots: &[PlacedSlot<'_>]) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            if let Some(reason) = conflict_reason(*a, *b) {
                conflicts.push(ScheduleConflict {
                    first_slot_id: a.slot.id,
                    second_slot_id: b.slot.id,
                    day_of_week: a.slot.day_of_week,
                    reason,
                });
            }
        }
    }
    conflicts
}

/// 候选时段与已有时段的冲突，跳过同 ID 的时段（更新自身时）
pub fn conflicts_with(
    candidate: PlacedSlot<'_>,
    existing: &[PlacedSlot<'_>],
) -> Vec<ScheduleConflict> {
    existing
        .iter()
        .filter(|other| other.slot.id != candidate.slot.id)
        .filter_map(|other| {
            conflict_reason(candidate, *other).map(|reason| ScheduleConflict {
                first_slot_id: candidate.slot.id,
                second_slot_id: other.slot.id,
                day_of_week: candidate.slot.day_of_week,
                reason,
            })
        })
        .collect()
}

/// 按星期、开始时间排序并标注是否存在冲突
pub fn build_views(
    slots: &[PlacedSlot<'_>],
    conflicts: &[ScheduleConflict],
) -> Vec<ScheduleSlotView> {
    let mut views: Vec<ScheduleSlotView> = slots
        .iter()
        .map(|placed| ScheduleSlotView {
            slot: placed.slot.clone(),
            subject_name: placed.subject.name.clone(),
            course: placed.subject.course.clone(),
            teacher_id: placed.subject.teacher_id,
            has_conflict: conflicts.iter().any(|c| {
                c.first_slot_id == placed.slot.id || c.second_slot_id == placed.slot.id
            }),
        })
        .collect();
    views.sort_by(|a, b| {
        (a.slot.day_of_week.number(), a.slot.start_time, a.slot.id).cmp(&(
            b.slot.day_of_week.number(),
            b.slot.start_time,
            b.slot.id,
        ))
    });
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedules::entities::Weekday;
    use crate::services::test_support::subject;
    use chrono::NaiveTime;

    fn slot(id: i64, subject_id: i64, day: Weekday, start: &str, end: &str) -> ScheduleSlot {
        ScheduleSlot {
            id,
            subject_id,
            day_of_week: day,
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            classroom: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_overlapping_slots_of_same_course_conflict() {
        let math = subject(1, 10, "5A");
        let history = subject(2, 11, "5A");
        let a = slot(1, 1, Weekday::Monday, "08:00", "09:30");
        let b = slot(2, 2, Weekday::Monday, "09:00", "10:00");

        let placed = [
            PlacedSlot { slot: &a, subject: &math },
            PlacedSlot { slot: &b, subject: &history },
        ];
        let conflicts = detect_conflicts(&placed);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].reason, ConflictReason::SameCourse);
        assert_eq!((conflicts[0].first_slot_id, conflicts[0].second_slot_id), (1, 2));
    }

    #[test]
    fn test_touching_slots_do_not_conflict() {
        let math = subject(1, 10, "5A");
        let a = slot(1, 1, Weekday::Monday, "08:00", "09:00");
        let b = slot(2, 1, Weekday::Monday, "09:00", "10:00");
        assert_eq!(
            conflict_reason(
                PlacedSlot { slot: &a, subject: &math },
                PlacedSlot { slot: &b, subject: &math }
            ),
            None
        );
    }

    #[test]
    fn test_different_days_do_not_conflict() {
        let math = subject(1, 10, "5A");
        let a = slot(1, 1, Weekday::Monday, "08:00", "09:00");
        let b = slot(2, 1, Weekday::Tuesday, "08:00", "09:00");
        assert!(!overlaps(&a, &b));
        assert!(
            detect_conflicts(&[
                PlacedSlot { slot: &a, subject: &math },
                PlacedSlot { slot: &b, subject: &math }
            ])
            .is_empty()
        );
    }

    #[test]
    fn test_reason_priority_and_classroom() {
        let math_5a = subject(1, 10, "5A");
        let math_5b = subject(2, 10, "5B");
        let art_4c = subject(3, 12, "4C");
        let mut a = slot(1, 1, Weekday::Friday, "10:00", "11:00");
        let mut b = slot(2, 3, Weekday::Friday, "10:30", "11:30");
        let c = slot(3, 2, Weekday::Friday, "10:45", "11:15");

        // 不同教师、不同班级、未填教室：无冲突
        assert_eq!(
            conflict_reason(
                PlacedSlot { slot: &a, subject: &math_5a },
                PlacedSlot { slot: &b, subject: &art_4c }
            ),
            None
        );

        a.classroom = Some("Lab 1".into());
        b.classroom = Some(" lab 1 ".into());
        assert_eq!(
            conflict_reason(
                PlacedSlot { slot: &a, subject: &math_5a },
                PlacedSlot { slot: &b, subject: &art_4c }
            ),
            Some(ConflictReason::SameClassroom)
        );

        // 同一教师优先于教室
        assert_eq!(
            conflict_reason(
                PlacedSlot { slot: &a, subject: &math_5a },
                PlacedSlot { slot: &c, subject: &math_5b }
            ),
            Some(ConflictReason::SameTeacher)
        );
    }

    #[test]
    fn test_candidate_skips_itself_and_views_are_flagged() {
        let math = subject(1, 10, "5A");
        let history = subject(2, 11, "5A");
        let a = slot(1, 1, Weekday::Wednesday, "08:00", "09:00");
        let b = slot(2, 2, Weekday::Wednesday, "08:30", "09:30");
        let c = slot(3, 2, Weekday::Monday, "08:30", "09:30");
        let placed = [
            PlacedSlot { slot: &a, subject: &math },
            PlacedSlot { slot: &b, subject: &history },
            PlacedSlot { slot: &c, subject: &history },
        ];

        let found = conflicts_with(placed[0], &placed);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].second_slot_id, 2);

        let conflicts = detect_conflicts(&placed);
        let views = build_views(&placed, &conflicts);
        let order: Vec<i64> = views.iter().map(|v| v.slot.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert!(!views[0].has_conflict);
        assert!(views[1].has_conflict && views[2].has_conflict);
    }
}
