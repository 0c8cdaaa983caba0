use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintCategory {
    Electrical,
    Plumbing,
    Furniture,
    Cleanliness,
    Internet,
    Other,
}

impl ComplaintCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintCategory::Electrical => "Electrical",
            ComplaintCategory::Plumbing => "Plumbing",
            ComplaintCategory::Furniture => "Furniture",
            ComplaintCategory::Cleanliness => "Cleanliness",
            ComplaintCategory::Internet => "Internet",
            ComplaintCategory::Other => "Other",
        }
    }
}

impl std::str::FromStr for ComplaintCategory {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electrical" => Ok(ComplaintCategory::Electrical),
            "Plumbing" => Ok(ComplaintCategory::Plumbing),
            "Furniture" => Ok(ComplaintCategory::Furniture),
            "Cleanliness" => Ok(ComplaintCategory::Cleanliness),
            "Internet" => Ok(ComplaintCategory::Internet),
            "Other" => Ok(ComplaintCategory::Other),
            other => Err(CampusError::Validation(format!("Unknown complaint category: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Pending,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Resolved => "Resolved",
        }
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ComplaintStatus::Pending),
            "Resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(CampusError::Validation(format!("Unknown complaint status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Option<Uuid>,
    pub category: ComplaintCategory,
    pub description: String,
    pub status: ComplaintStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaiseComplaintRequest {
    pub student_id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Option<Uuid>,
    pub category: ComplaintCategory,
    pub description: String,
}

impl RaiseComplaintRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.description.trim().is_empty() {
            return Err(CampusError::Validation("description is required".to_string()));
        }
        Ok(())
    }

    pub fn into_complaint(self) -> Complaint {
        Complaint {
            id: Uuid::new_v4(),
            student_id: self.student_id,
            hostel_id: self.hostel_id,
            room_id: self.room_id,
            category: self.category,
            description: self.description.trim().to_string(),
            status: ComplaintStatus::Pending,
            remarks: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveComplaintRequest {
    pub remarks: Option<String>,
}
