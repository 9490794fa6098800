use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 成绩类型
    GradeKind, "../frontend/src/types/generated/grade.ts" {
        Exam => "exam",
        Assignment => "assignment",
        Oral => "oral",
        Project => "project",
        Other => "other",
    }
}

define_string_enum! {
    GradeStanding, "../frontend/src/types/generated/grade.ts" {
        Passing => "passing",
        Failing => "failing",
        NoGrades => "no_grades",
    }
}

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub subject_id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub kind: GradeKind,
    pub score: f64,
    pub term: i32,
    pub comment: Option<String>,
    pub graded_on: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct TermAverage {
    pub term: i32,
    pub count: i64,
    pub average: f64,
}

// 某学生在某科目的成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSummary {
    pub student_id: i64,
    pub subject_id: i64,
    pub count: i64,
    pub average: Option<f64>,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    pub term_averages: Vec<TermAverage>,
    pub standing: GradeStanding,
}
