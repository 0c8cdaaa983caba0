pub mod academic;
pub mod admin;
pub mod allotment;
pub mod attendance;
pub mod calendar;
pub mod complaint;
pub mod enrollment;
pub mod grade;
pub mod hostel;
pub mod settings;
pub mod student;
pub mod willingness;

use campus_core::errors::{CampusError, CampusResult};
use uuid::Uuid;

/// Turns a missing row into the standard `NotFound` error.
pub(crate) fn found<T>(value: Option<T>, entity: &str, id: Uuid) -> CampusResult<T> {
    value.ok_or_else(|| CampusError::not_found(entity, id))
}
