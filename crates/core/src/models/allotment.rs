//! Room allotments and the eligibility rule applied before one is created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};
use crate::models::hostel::{Hostel, HostelStatus, HostelType, Room};
use crate::models::student::{Gender, Student};
use crate::models::willingness::{Willingness, WillingnessStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllotmentStatus {
    Allotted,
    Vacated,
}

impl AllotmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllotmentStatus::Allotted => "Allotted",
            AllotmentStatus::Vacated => "Vacated",
        }
    }
}

impl std::str::FromStr for AllotmentStatus {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Allotted" => Ok(AllotmentStatus::Allotted),
            "Vacated" => Ok(AllotmentStatus::Vacated),
            other => Err(CampusError::Validation(format!("Unknown allotment status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAllotment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Uuid,
    pub year: i32,
    pub willingness_id: Uuid,
    pub status: AllotmentStatus,
    pub allotted_at: DateTime<Utc>,
    pub vacated_at: Option<DateTime<Utc>>,
}

impl RoomAllotment {
    pub fn is_active(&self) -> bool {
        self.status == AllotmentStatus::Allotted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotRoomRequest {
    pub student_id: Uuid,
    pub room_id: Uuid,
    pub year: i32,
}

/// Everything the eligibility rule looks at, loaded inside one transaction.
pub struct AllotmentCandidate<'a> {
    pub student: &'a Student,
    pub hostel: &'a Hostel,
    pub room: &'a Room,
    pub willingness: Option<&'a Willingness>,
    pub has_active_allotment: bool,
}

impl AllotmentCandidate<'_> {
    /// Checks run in a fixed order so callers see the most specific reason.
    pub fn check(&self) -> CampusResult<()> {
        if self.room.hostel_id != self.hostel.id {
            return Err(CampusError::Validation(
                "Room does not belong to the selected hostel".to_string(),
            ));
        }
        if self.hostel.status != HostelStatus::Active {
            return Err(CampusError::Validation(format!(
                "Hostel {} is {} and not accepting allotments",
                self.hostel.name,
                self.hostel.status.as_str()
            )));
        }
        if !self.hostel.hostel_type.admits(self.student.gender) {
            return Err(CampusError::Validation(format!(
                "A {} hostel cannot house a {} student",
                self.hostel.hostel_type.as_str(),
                self.student.gender.as_str()
            )));
        }
        match self.willingness {
            None => {
                return Err(CampusError::Validation(
                    "No willingness submitted for this year".to_string(),
                ));
            }
            Some(w) if w.status != WillingnessStatus::Approved => {
                return Err(CampusError::Validation(format!(
                    "Willingness is {} and not approved",
                    w.status.as_str()
                )));
            }
            Some(_) => {}
        }
        if self.has_active_allotment {
            return Err(CampusError::Conflict(
                "Student already allotted a room for this year".to_string(),
            ));
        }
        if self.room.is_full() {
            return Err(CampusError::Conflict("Room is full".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAllocateRequest {
    pub year: i32,
    pub hostel_id: Option<Uuid>,
}

/// Snapshot sent to the allocation policy service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    pub year: i32,
    pub rooms: Vec<PolicyRoom>,
    pub students: Vec<PolicyStudent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRoom {
    pub room_id: Uuid,
    pub hostel_id: Uuid,
    pub hostel_type: HostelType,
    pub vacancies: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStudent {
    pub student_id: Uuid,
    pub willingness_id: Uuid,
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub assignments: Vec<PolicyAssignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAssignment {
    pub student_id: Uuid,
    pub room_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedAssignment {
    pub student_id: Uuid,
    pub room_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAllocateResponse {
    pub allotted: Vec<RoomAllotment>,
    pub rejected: Vec<RejectedAssignment>,
}
