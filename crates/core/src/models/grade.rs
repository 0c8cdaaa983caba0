//! Grade computation: weighted totals, letter grades and semester aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};
use crate::models::academic::CourseType;
use crate::models::student::{GradeSheet, GradeSheetEntry};

/// Raw component scores, each on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMarks {
    pub assignments: f64,
    pub midsem: f64,
    pub endsem: f64,
    pub quiz: f64,
    pub project: f64,
}

impl ComponentMarks {
    pub fn validate(&self) -> CampusResult<()> {
        for (name, value) in [
            ("assignments", self.assignments),
            ("midsem", self.midsem),
            ("endsem", self.endsem),
            ("quiz", self.quiz),
            ("project", self.project),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(CampusError::Validation(format!(
                    "{} must be between 0 and 100",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Component weights in percent; they sum to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighting {
    pub assignments: f64,
    pub midsem: f64,
    pub endsem: f64,
    pub quiz: f64,
    pub project: f64,
}

impl Weighting {
    pub const THEORY: Weighting = Weighting {
        assignments: 15.0,
        midsem: 25.0,
        endsem: 40.0,
        quiz: 10.0,
        project: 10.0,
    };

    pub const LAB: Weighting = Weighting {
        assignments: 30.0,
        midsem: 10.0,
        endsem: 20.0,
        quiz: 10.0,
        project: 30.0,
    };

    pub fn for_course_type(course_type: CourseType) -> Self {
        match course_type {
            CourseType::Theory => Weighting::THEORY,
            CourseType::Lab => Weighting::LAB,
        }
    }

    pub fn total(&self, marks: &ComponentMarks) -> f64 {
        let weighted = marks.assignments * self.assignments
            + marks.midsem * self.midsem
            + marks.endsem * self.endsem
            + marks.quiz * self.quiz
            + marks.project * self.project;
        round2(weighted / 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

impl LetterGrade {
    const TABLE: [(f64, LetterGrade); 7] = [
        (90.0, LetterGrade::APlus),
        (80.0, LetterGrade::A),
        (70.0, LetterGrade::BPlus),
        (60.0, LetterGrade::B),
        (50.0, LetterGrade::CPlus),
        (45.0, LetterGrade::C),
        (40.0, LetterGrade::D),
    ];

    pub fn from_total(total: f64) -> Self {
        Self::TABLE
            .iter()
            .find(|(cutoff, _)| total >= *cutoff)
            .map(|(_, letter)| *letter)
            .unwrap_or(LetterGrade::F)
    }

    pub fn points(&self) -> i32 {
        match self {
            LetterGrade::APlus => 10,
            LetterGrade::A => 9,
            LetterGrade::BPlus => 8,
            LetterGrade::B => 7,
            LetterGrade::CPlus => 6,
            LetterGrade::C => 5,
            LetterGrade::D => 4,
            LetterGrade::F => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    pub fn is_pass(&self) -> bool {
        self.points() > 0
    }
}

impl std::str::FromStr for LetterGrade {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::TABLE
            .iter()
            .map(|(_, letter)| *letter)
            .chain(std::iter::once(LetterGrade::F))
            .find(|letter| letter.as_str() == s)
            .ok_or_else(|| CampusError::Validation(format!("Unknown letter grade: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    #[serde(flatten)]
    pub marks: ComponentMarks,
    pub total: f64,
    pub letter_grade: LetterGrade,
    pub grade_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    pub fn compute(enrollment_id: Uuid, course_type: CourseType, marks: ComponentMarks) -> Self {
        let total = Weighting::for_course_type(course_type).total(&marks);
        let letter_grade = LetterGrade::from_total(total);
        let now = Utc::now();
        Grade {
            id: Uuid::new_v4(),
            enrollment_id,
            marks,
            total,
            letter_grade,
            grade_points: letter_grade.points(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGradeRequest {
    pub enrollment_id: Uuid,
    #[serde(flatten)]
    pub marks: ComponentMarks,
}

/// Builds the grade sheet for `semester` from its course rows, folding the
/// student's earlier sheets into the cumulative figure.
///
/// Credits count as earned only when the course carries grade points.
pub fn build_grade_sheet(
    semester: i32,
    courses: Vec<GradeSheetEntry>,
    previous: &[GradeSheet],
) -> GradeSheet {
    let mut credits_offered = 0;
    let mut credits_earned = 0;
    let mut credit_points = 0;
    let mut backlogs = Vec::new();

    for course in &courses {
        credits_offered += course.credits;
        credit_points += course.credits * course.grade_points;
        if course.grade_points > 0 {
            credits_earned += course.credits;
        } else {
            backlogs.push(course.course_code.clone());
        }
    }

    let sgpa = ratio(credit_points as f64, credits_offered as f64);

    let (prior_points, prior_credits) = previous
        .iter()
        .filter(|sheet| sheet.semester != semester)
        .fold((0.0, 0.0), |(points, credits), sheet| {
            (
                points + sheet.sgpa * sheet.credits_offered as f64,
                credits + sheet.credits_offered as f64,
            )
        });
    let cgpa = ratio(
        prior_points + credit_points as f64,
        prior_credits + credits_offered as f64,
    );

    GradeSheet {
        semester,
        sgpa,
        cgpa,
        credits_offered,
        credits_earned,
        courses,
        backlogs,
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        round2(numerator / denominator)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
