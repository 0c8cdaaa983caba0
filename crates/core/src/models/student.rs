use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(CampusError::Validation(format!("Unknown gender: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub college_id: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub gender: Gender,
    pub department: String,
    pub programme: String,
    pub batch: i32,
    pub current_sem: i32,
    pub cgpa: f64,
    pub created_at: DateTime<Utc>,
}

/// One row of a semester grade sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSheetEntry {
    pub enrollment_id: Uuid,
    pub grade_id: Option<Uuid>,
    pub course_code: String,
    pub credits: i32,
    pub letter_grade: String,
    pub grade_points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSheet {
    pub semester: i32,
    pub sgpa: f64,
    pub cgpa: f64,
    pub credits_offered: i32,
    pub credits_earned: i32,
    pub courses: Vec<GradeSheetEntry>,
    #[serde(default)]
    pub backlogs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub name: String,
    pub college_id: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
    pub department: String,
    pub programme: String,
    pub batch: i32,
    pub current_sem: Option<i32>,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> CampusResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("collegeId", &self.college_id),
            ("department", &self.department),
            ("programme", &self.programme),
        ] {
            if value.trim().is_empty() {
                return Err(CampusError::Validation(format!("{} is required", field)));
            }
        }
        if !is_plausible_email(&self.email) {
            return Err(CampusError::Validation("A valid email is required".to_string()));
        }
        if self.password.len() < 8 {
            return Err(CampusError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if matches!(self.current_sem, Some(sem) if sem < 1) {
            return Err(CampusError::Validation("currentSem must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn into_student(self, password_hash: String) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            college_id: self.college_id.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password_hash,
            gender: self.gender,
            department: self.department.trim().to_string(),
            programme: self.programme.trim().to_string(),
            batch: self.batch,
            current_sem: self.current_sem.unwrap_or(1),
            cgpa: 0.0,
            created_at: Utc::now(),
        }
    }
}

pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
