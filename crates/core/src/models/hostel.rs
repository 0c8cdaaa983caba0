use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};
use crate::models::student::Gender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostelType {
    Boys,
    Girls,
    Mixed,
}

impl HostelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostelType::Boys => "boys",
            HostelType::Girls => "girls",
            HostelType::Mixed => "mixed",
        }
    }

    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            HostelType::Boys => gender == Gender::Male,
            HostelType::Girls => gender == Gender::Female,
            HostelType::Mixed => true,
        }
    }
}

impl std::str::FromStr for HostelType {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boys" => Ok(HostelType::Boys),
            "girls" => Ok(HostelType::Girls),
            "mixed" => Ok(HostelType::Mixed),
            other => Err(CampusError::Validation(format!("Unknown hostel type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostelStatus {
    Active,
    Closed,
    Maintenance,
}

impl HostelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostelStatus::Active => "active",
            HostelStatus::Closed => "closed",
            HostelStatus::Maintenance => "maintenance",
        }
    }
}

impl std::str::FromStr for HostelStatus {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(HostelStatus::Active),
            "closed" => Ok(HostelStatus::Closed),
            "maintenance" => Ok(HostelStatus::Maintenance),
            other => Err(CampusError::Validation(format!("Unknown hostel status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostel {
    pub id: Uuid,
    pub name: String,
    pub hostel_type: HostelType,
    pub status: HostelStatus,
    pub created_at: DateTime<Utc>,
}

/// Totals derived from a hostel's rooms at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelLedger {
    pub total_rooms: i64,
    pub total_capacity: i64,
    pub total_occupied: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelDetail {
    #[serde(flatten)]
    pub hostel: Hostel,
    #[serde(flatten)]
    pub ledger: HostelLedger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostelRequest {
    pub name: String,
    pub hostel_type: HostelType,
    pub status: Option<HostelStatus>,
}

impl CreateHostelRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.name.trim().is_empty() {
            return Err(CampusError::Validation("name is required".to_string()));
        }
        Ok(())
    }

    pub fn into_hostel(self) -> Hostel {
        Hostel {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            hostel_type: self.hostel_type,
            status: self.status.unwrap_or(HostelStatus::Active),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHostelStatusRequest {
    pub status: HostelStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCondition {
    Good,
    Fair,
    Damaged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAsset {
    pub asset_type: String,
    pub count: u32,
    pub condition: AssetCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub formatted_room: String,
    pub capacity: i32,
    pub occupied: i32,
    #[serde(default)]
    pub assets: Vec<RoomAsset>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn vacancies(&self) -> i32 {
        (self.capacity - self.occupied).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.occupied >= self.capacity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetail {
    #[serde(flatten)]
    pub room: Room,
    pub students: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub hostel_id: Uuid,
    pub formatted_room: String,
    pub capacity: i32,
    #[serde(default)]
    pub assets: Vec<RoomAsset>,
}

impl CreateRoomRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.formatted_room.trim().is_empty() {
            return Err(CampusError::Validation("formattedRoom is required".to_string()));
        }
        if self.capacity <= 0 {
            return Err(CampusError::Validation("capacity must be positive".to_string()));
        }
        Ok(())
    }

    pub fn into_room(self) -> Room {
        Room {
            id: Uuid::new_v4(),
            hostel_id: self.hostel_id,
            formatted_room: self.formatted_room.trim().to_uppercase(),
            capacity: self.capacity,
            occupied: 0,
            assets: self.assets,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetsRequest {
    pub assets: Vec<RoomAsset>,
}

/// One faculty member in charge of one hostel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warden {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub hostel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignWardenRequest {
    pub faculty_id: Uuid,
    pub hostel_id: Uuid,
}

/// A room whose occupied counter disagreed with its active allotments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyCorrection {
    pub room_id: Uuid,
    pub recorded: i32,
    pub actual: i32,
}
