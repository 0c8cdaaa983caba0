use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};
use crate::models::student::is_plausible_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Designation {
    Professor,
    AssociateProfessor,
    AssistantProfessor,
    Lecturer,
}

impl Designation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Designation::Professor => "Professor",
            Designation::AssociateProfessor => "AssociateProfessor",
            Designation::AssistantProfessor => "AssistantProfessor",
            Designation::Lecturer => "Lecturer",
        }
    }
}

impl std::str::FromStr for Designation {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Professor" => Ok(Designation::Professor),
            "AssociateProfessor" => Ok(Designation::AssociateProfessor),
            "AssistantProfessor" => Ok(Designation::AssistantProfessor),
            "Lecturer" => Ok(Designation::Lecturer),
            other => Err(CampusError::Validation(format!("Unknown designation: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub designation: Designation,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyRequest {
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub designation: Designation,
    pub department: String,
}

impl CreateFacultyRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.name.trim().is_empty() || self.employee_id.trim().is_empty() {
            return Err(CampusError::Validation(
                "name and employeeId are required".to_string(),
            ));
        }
        if !is_plausible_email(&self.email) {
            return Err(CampusError::Validation("A valid email is required".to_string()));
        }
        Ok(())
    }

    pub fn into_faculty(self) -> Faculty {
        Faculty {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            employee_id: self.employee_id.trim().to_string(),
            designation: self.designation,
            department: self.department.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    Lab,
    Theory,
}

impl CourseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Lab => "Lab",
            CourseType::Theory => "Theory",
        }
    }
}

impl std::str::FromStr for CourseType {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lab" => Ok(CourseType::Lab),
            "Theory" => Ok(CourseType::Theory),
            other => Err(CampusError::Validation(format!("Unknown course type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub course_type: CourseType,
    pub syllabus: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub course_type: CourseType,
    #[serde(default)]
    pub syllabus: String,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.code.trim().is_empty() || self.name.trim().is_empty() {
            return Err(CampusError::Validation("code and name are required".to_string()));
        }
        if self.credits <= 0 {
            return Err(CampusError::Validation("credits must be positive".to_string()));
        }
        Ok(())
    }

    pub fn into_course(self) -> Course {
        Course {
            id: Uuid::new_v4(),
            code: self.code.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            credits: self.credits,
            course_type: self.course_type,
            syllabus: self.syllabus,
            created_at: Utc::now(),
        }
    }
}

/// A course taught in a given semester and year to a set of branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOffering {
    pub id: Uuid,
    pub course_id: Uuid,
    pub semester: i32,
    pub year: i32,
    pub branches: Vec<String>,
    pub coordinator_id: Uuid,
    pub instructor_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl CourseOffering {
    pub fn has_instructor(&self, faculty_id: Uuid) -> bool {
        self.instructor_ids.contains(&faculty_id)
    }

    /// An empty branch list admits every department.
    pub fn admits_branch(&self, department: &str) -> bool {
        self.branches.is_empty()
            || self
                .branches
                .iter()
                .any(|branch| branch.eq_ignore_ascii_case(department))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferingRequest {
    pub course_id: Uuid,
    pub semester: i32,
    pub year: i32,
    #[serde(default)]
    pub branches: Vec<String>,
    pub coordinator_id: Uuid,
    pub instructor_ids: Vec<Uuid>,
}

impl CreateOfferingRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.semester < 1 {
            return Err(CampusError::Validation("semester must be at least 1".to_string()));
        }
        if self.instructor_ids.is_empty() {
            return Err(CampusError::Validation(
                "An offering needs at least one instructor".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_offering(self) -> CourseOffering {
        let mut instructor_ids = Vec::with_capacity(self.instructor_ids.len());
        for id in self.instructor_ids {
            if !instructor_ids.contains(&id) {
                instructor_ids.push(id);
            }
        }
        CourseOffering {
            id: Uuid::new_v4(),
            course_id: self.course_id,
            semester: self.semester,
            year: self.year,
            branches: self
                .branches
                .into_iter()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect(),
            coordinator_id: self.coordinator_id,
            instructor_ids,
            created_at: Utc::now(),
        }
    }
}
