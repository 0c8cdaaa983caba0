use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CampusError;

pub const DEFAULT_SHORTAGE_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            other => Err(CampusError::Validation(format!("Unknown attendance status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub enrollment_id: Uuid,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub date: NaiveDate,
    pub records: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortageRequest {
    pub offering_id: Uuid,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: u32,
    pub total: u32,
    pub percentage: f64,
}

impl AttendanceSummary {
    /// Counts the records; an enrollment with no records reports 0%.
    pub fn from_records(records: &[Attendance]) -> Self {
        let total = records.len() as u32;
        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count() as u32;
        let percentage = if total == 0 {
            0.0
        } else {
            (present as f64 * 10_000.0 / total as f64).round() / 100.0
        };
        AttendanceSummary {
            present,
            total,
            percentage,
        }
    }

    /// Compares the exact ratio; `percentage` is rounded for display only.
    pub fn is_short_of(&self, threshold: f64) -> bool {
        self.total > 0 && (self.present as f64 * 100.0 / self.total as f64) < threshold
    }
}
