//! Room allotment: manual allotment, vacating and policy-driven
//! auto-allocation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::allotment::{
    AllotRoomRequest, AutoAllocateRequest, AutoAllocateResponse, PolicyRequest,
    RejectedAssignment, RoomAllotment,
};
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::found;
use crate::response::{ApiResponse, ApiResult, CreatedResult};

#[derive(Debug, Serialize)]
pub struct AllotmentBody {
    pub allotment: RoomAllotment,
}

#[axum::debug_handler]
pub async fn allot_room(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AllotRoomRequest>,
) -> CreatedResult<AllotmentBody> {
    let allotment = state.db.allot_room(payload).await?;
    Ok(ApiResponse::created("Room allotted", AllotmentBody { allotment }))
}

#[axum::debug_handler]
pub async fn vacate_allotment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<AllotmentBody> {
    let allotment = state.db.vacate_allotment(id).await?;
    Ok(ApiResponse::with_message("Room vacated", AllotmentBody { allotment }))
}

#[axum::debug_handler]
pub async fn get_allotment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<AllotmentBody> {
    let allotment = found(state.db.get_allotment(id).await?, "Allotment", id)?;
    Ok(ApiResponse::ok(AllotmentBody { allotment }))
}

/// Asks the policy service for assignments and applies each one through the
/// regular allotment path. Proposals that no longer pass eligibility are
/// reported back as rejected; storage failures abort the run.
#[axum::debug_handler]
pub async fn auto_allocate(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AutoAllocateRequest>,
) -> ApiResult<AutoAllocateResponse> {
    if let Some(hostel_id) = payload.hostel_id {
        found(state.db.get_hostel(hostel_id).await?, "Hostel", hostel_id)?;
    }

    let rooms = state.db.vacant_rooms(payload.hostel_id).await?;
    let students = state.db.approved_without_allotment(payload.year).await?;

    if rooms.is_empty() || students.is_empty() {
        return Ok(ApiResponse::with_message(
            "Nothing to allocate",
            AutoAllocateResponse {
                allotted: Vec::new(),
                rejected: Vec::new(),
            },
        ));
    }

    let proposal = state
        .policy
        .allocate(PolicyRequest {
            year: payload.year,
            rooms,
            students,
        })
        .await?;

    let mut allotted = Vec::new();
    let mut rejected = Vec::new();
    for assignment in proposal.assignments {
        let request = AllotRoomRequest {
            student_id: assignment.student_id,
            room_id: assignment.room_id,
            year: payload.year,
        };
        match state.db.allot_room(request).await {
            Ok(allotment) => allotted.push(allotment),
            Err(err @ (CampusError::Database(_) | CampusError::Internal(_))) => {
                return Err(err.into());
            }
            Err(err) => {
                tracing::warn!(
                    "Policy assignment of student {} to room {} rejected: {}",
                    assignment.student_id,
                    assignment.room_id,
                    err
                );
                rejected.push(RejectedAssignment {
                    student_id: assignment.student_id,
                    room_id: assignment.room_id,
                    reason: err.public_message(),
                });
            }
        }
    }

    tracing::info!(
        "Auto-allocation for {}: {} allotted, {} rejected",
        payload.year,
        allotted.len(),
        rejected.len()
    );

    Ok(ApiResponse::with_message(
        format!("{} room(s) allotted", allotted.len()),
        AutoAllocateResponse { allotted, rejected },
    ))
}
