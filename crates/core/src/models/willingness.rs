use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WillingnessStatus {
    Submitted,
    Approved,
    Rejected,
}

impl WillingnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WillingnessStatus::Submitted => "Submitted",
            WillingnessStatus::Approved => "Approved",
            WillingnessStatus::Rejected => "Rejected",
        }
    }

    /// A review decision is only taken once, on a submitted request.
    pub fn review(self, decision: WillingnessStatus) -> CampusResult<WillingnessStatus> {
        match (self, decision) {
            (WillingnessStatus::Submitted, WillingnessStatus::Approved | WillingnessStatus::Rejected) => {
                Ok(decision)
            }
            (_, WillingnessStatus::Submitted) => Err(CampusError::Validation(
                "A review must approve or reject".to_string(),
            )),
            (current, _) => Err(CampusError::InvalidTransition {
                from: current.as_str().to_string(),
                to: decision.as_str().to_string(),
            }),
        }
    }
}

impl std::str::FromStr for WillingnessStatus {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Submitted" => Ok(WillingnessStatus::Submitted),
            "Approved" => Ok(WillingnessStatus::Approved),
            "Rejected" => Ok(WillingnessStatus::Rejected),
            other => Err(CampusError::Validation(format!("Unknown willingness status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Willingness {
    pub id: Uuid,
    pub student_id: Uuid,
    pub year: i32,
    pub status: WillingnessStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Willingness {
    pub fn submitted(student_id: Uuid, year: i32) -> Self {
        let now = Utc::now();
        Willingness {
            id: Uuid::new_v4(),
            student_id,
            year,
            status: WillingnessStatus::Submitted,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWillingnessRequest {
    pub student_id: Uuid,
    pub year: i32,
}

impl SubmitWillingnessRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if !(2000..=2100).contains(&self.year) {
            return Err(CampusError::Validation(format!("Invalid academic year {}", self.year)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWillingnessRequest {
    pub status: WillingnessStatus,
    pub remarks: Option<String>,
}
