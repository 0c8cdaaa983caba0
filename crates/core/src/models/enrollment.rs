//! Enrollment records and the status machine that governs them.
//!
//! ```text
//! selected ──► approved ──► completed
//!    │            │  ▲ └──► Supplementary ──► completed
//!    │            │  └─┘ (reassignment)
//!    └──► dropped ◄┘──► Attendance Failure
//! ```

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[serde(rename = "selected")]
    Selected,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "dropped")]
    Dropped,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "Attendance Failure")]
    AttendanceFailure,
    #[serde(rename = "Supplementary")]
    Supplementary,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 6] = [
        EnrollmentStatus::Selected,
        EnrollmentStatus::Approved,
        EnrollmentStatus::Dropped,
        EnrollmentStatus::Completed,
        EnrollmentStatus::AttendanceFailure,
        EnrollmentStatus::Supplementary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Selected => "selected",
            EnrollmentStatus::Approved => "approved",
            EnrollmentStatus::Dropped => "dropped",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::AttendanceFailure => "Attendance Failure",
            EnrollmentStatus::Supplementary => "Supplementary",
        }
    }

    /// States reachable from `self` in one step.
    pub fn allowed_next(&self) -> &'static [EnrollmentStatus] {
        use EnrollmentStatus::*;
        match self {
            Selected => &[Approved, Dropped],
            Approved => &[Approved, Completed, Dropped, AttendanceFailure, Supplementary],
            Supplementary => &[Supplementary, Completed],
            Completed => &[Completed],
            Dropped | AttendanceFailure => &[],
        }
    }

    pub fn can_transition_to(&self, next: EnrollmentStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn transition(self, next: EnrollmentStatus) -> CampusResult<EnrollmentStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CampusError::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().iter().all(|next| next == self)
    }

    /// Whether the generic status endpoint may set this status. Approval
    /// goes through faculty assignment and grading sets completed or
    /// Supplementary, so only the withdrawal outcomes are left.
    pub fn is_manually_settable(&self) -> bool {
        matches!(self, EnrollmentStatus::Dropped | EnrollmentStatus::AttendanceFailure)
    }

    /// Statuses whose enrollments appear on a semester grade sheet.
    pub fn is_graded_outcome(&self) -> bool {
        matches!(
            self,
            EnrollmentStatus::Completed
                | EnrollmentStatus::Supplementary
                | EnrollmentStatus::AttendanceFailure
        )
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnrollmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CampusError::Validation(format!("Unknown enrollment status: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub day: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub offering_id: Uuid,
    pub faculty_id: Option<Uuid>,
    pub schedule: Vec<ScheduleSlot>,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn selected(student_id: Uuid, offering_id: Uuid) -> Self {
        let now = Utc::now();
        Enrollment {
            id: Uuid::new_v4(),
            student_id,
            offering_id,
            faculty_id: None,
            schedule: Vec::new(),
            status: EnrollmentStatus::Selected,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEnrollRequest {
    pub student_id: Uuid,
    pub offering_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignFacultyRequest {
    pub offering_id: Uuid,
    pub enrollment_ids: Vec<Uuid>,
    pub faculty_id: Uuid,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
}

impl AssignFacultyRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.enrollment_ids.is_empty() {
            return Err(CampusError::Validation("No enrollments selected".to_string()));
        }
        validate_schedule(&self.schedule)
    }
}

pub fn validate_schedule(schedule: &[ScheduleSlot]) -> CampusResult<()> {
    for slot in schedule {
        if slot.start_time >= slot.end_time {
            return Err(CampusError::Validation(format!(
                "Schedule slot on {:?} must start before it ends",
                slot.day
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub enrollment_ids: Vec<Uuid>,
    pub status: EnrollmentStatus,
}
