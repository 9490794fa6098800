//! 成绩汇总：平均分、最高/最低分、各学期平均分和及格状态

use std::collections::BTreeMap;

use crate::config::SchoolConfig;
use crate::models::grades::entities::{Grade, GradeStanding, GradeSummary, TermAverage};
use crate::models::grades::responses::{ReportCard, ReportCardEntry};
use crate::models::subjects::entities::Subject;
use crate::services::attendance::summary::round2;

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn summarize(
    student_id: i64,
    subject_id: i64,
    grades: &[Grade],
    rules: &SchoolConfig,
) -> GradeSummary {
    let scores: Vec<&Grade> = grades
        .iter()
        .filter(|g| g.student_id == student_id && g.subject_id == subject_id)
        .collect();

    let average = mean(scores.iter().map(|g| g.score)).map(round2);
    let highest = scores.iter().map(|g| g.score).reduce(f64::max);
    let lowest = scores.iter().map(|g| g.score).reduce(f64::min);

    let mut by_term: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for grade in &scores {
        by_term.entry(grade.term).or_default().push(grade.score);
    }
    let term_averages = by_term
        .into_iter()
        .map(|(term, values)| TermAverage {
            term,
            count: values.len() as i64,
            average: mean(values.into_iter()).map(round2).unwrap_or_default(),
        })
        .collect();

    let standing = match average {
        None => GradeStanding::NoGrades,
        Some(avg) if avg >= rules.passing_grade => GradeStanding::Passing,
        Some(_) => GradeStanding::Failing,
    };

    GradeSummary {
        student_id,
        subject_id,
        count: scores.len() as i64,
        average,
        highest,
        lowest,
        term_averages,
        standing,
    }
}

/// 成绩单：各科汇总，总平均为有成绩科目平均分的平均值
pub fn report_card(
    student_id: i64,
    subjects: &[Subject],
    grades: &[Grade],
    rules: &SchoolConfig,
) -> ReportCard {
    let entries: Vec<ReportCardEntry> = subjects
        .iter()
        .map(|subject| ReportCardEntry {
            subject_id: subject.id,
            subject_name: subject.name.clone(),
            summary: summarize(student_id, subject.id, grades, rules),
        })
        .collect();

    let overall_average = mean(entries.iter().filter_map(|e| e.summary.average)).map(round2);

    ReportCard {
        student_id,
        subjects: entries,
        overall_average,
    }
}

/// 校验分数范围和学期
pub fn validate_score_and_term(
    score: Option<f64>,
    term: Option<i32>,
    rules: &SchoolConfig,
) -> Result<(), String> {
    if let Some(score) = score
        && (!score.is_finite() || score < rules.grade_min || score > rules.grade_max)
    {
        return Err(format!(
            "score must be between {} and {}",
            rules.grade_min, rules.grade_max
        ));
    }
    if let Some(term) = term
        && (term < 1 || term > rules.terms_per_year)
    {
        return Err(format!("term must be between 1 and {}", rules.terms_per_year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::GradeKind;
    use crate::services::test_support::subject;
    use chrono::NaiveDate;

    fn grade(id: i64, student_id: i64, subject_id: i64, score: f64, term: i32) -> Grade {
        Grade {
            id,
            subject_id,
            student_id,
            teacher_id: 10,
            title: format!("Evaluation {id}"),
            kind: GradeKind::Exam,
            score,
            term,
            comment: None,
            graded_on: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summary_without_grades() {
        let summary = summarize(1, 1, &[], &SchoolConfig::default());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, None);
        assert_eq!(summary.standing, GradeStanding::NoGrades);
        assert!(summary.term_averages.is_empty());
    }

    #[test]
    fn test_summary_averages_and_terms() {
        let grades = vec![
            grade(1, 1, 7, 8.0, 2),
            grade(2, 1, 7, 6.5, 1),
            grade(3, 1, 7, 7.0, 1),
            grade(4, 2, 7, 2.0, 1),
        ];
        let summary = summarize(1, 7, &grades, &SchoolConfig::default());
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, Some(7.17));
        assert_eq!(summary.highest, Some(8.0));
        assert_eq!(summary.lowest, Some(6.5));
        assert_eq!(
            summary.term_averages,
            vec![
                TermAverage { term: 1, count: 2, average: 6.75 },
                TermAverage { term: 2, count: 1, average: 8.0 },
            ]
        );
        assert_eq!(summary.standing, GradeStanding::Passing);
    }

    #[test]
    fn test_failing_below_passing_grade() {
        let grades = vec![grade(1, 1, 7, 4.0, 1), grade(2, 1, 7, 7.0, 1)];
        let summary = summarize(1, 7, &grades, &SchoolConfig::default());
        assert_eq!(summary.average, Some(5.5));
        assert_eq!(summary.standing, GradeStanding::Failing);
    }

    #[test]
    fn test_report_card_overall_average_skips_empty_subjects() {
        let subjects = vec![subject(7, 10, "5A"), subject(8, 11, "5A"), subject(9, 12, "5A")];
        let grades = vec![grade(1, 1, 7, 9.0, 1), grade(2, 1, 8, 6.0, 1)];
        let card = report_card(1, &subjects, &grades, &SchoolConfig::default());
        assert_eq!(card.subjects.len(), 3);
        assert_eq!(card.subjects[2].summary.standing, GradeStanding::NoGrades);
        assert_eq!(card.overall_average, Some(7.5));
    }

    #[test]
    fn test_validate_score_and_term() {
        let rules = SchoolConfig::default();
        assert!(validate_score_and_term(Some(10.0), Some(3), &rules).is_ok());
        assert!(validate_score_and_term(Some(0.5), None, &rules).is_err());
        assert!(validate_score_and_term(Some(f64::NAN), None, &rules).is_err());
        assert!(validate_score_and_term(None, Some(4), &rules).is_err());
        assert!(validate_score_and_term(None, None, &rules).is_ok());
    }
}
