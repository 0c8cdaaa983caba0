use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::complaint::{Complaint, RaiseComplaintRequest, ResolveComplaintRequest};
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::found;
use crate::response::{ApiResponse, ApiResult, CreatedResult};

#[derive(Debug, Serialize)]
pub struct ComplaintBody {
    pub complaint: Complaint,
}

#[axum::debug_handler]
pub async fn raise_complaint(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RaiseComplaintRequest>,
) -> CreatedResult<ComplaintBody> {
    payload.validate()?;
    found(
        state.db.get_student(payload.student_id).await?,
        "Student",
        payload.student_id,
    )?;
    found(state.db.get_hostel(payload.hostel_id).await?, "Hostel", payload.hostel_id)?;
    if let Some(room_id) = payload.room_id {
        let room = found(state.db.get_room(room_id).await?, "Room", room_id)?;
        if room.hostel_id != payload.hostel_id {
            return Err(CampusError::Validation(
                "Room does not belong to the selected hostel".to_string(),
            )
            .into());
        }
    }

    let complaint = state.db.create_complaint(payload.into_complaint()).await?;
    tracing::info!(
        "Complaint {} raised in hostel {} ({})",
        complaint.id,
        complaint.hostel_id,
        complaint.category.as_str()
    );

    Ok(ApiResponse::created("Complaint raised", ComplaintBody { complaint }))
}

#[axum::debug_handler]
pub async fn resolve_complaint(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResolveComplaintRequest>,
) -> ApiResult<ComplaintBody> {
    let complaint = state.db.resolve_complaint(id, payload.remarks).await?;
    Ok(ApiResponse::with_message("Complaint resolved", ComplaintBody { complaint }))
}

#[axum::debug_handler]
pub async fn get_complaint(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<ComplaintBody> {
    let complaint = found(state.db.get_complaint(id).await?, "Complaint", id)?;
    Ok(ApiResponse::ok(ComplaintBody { complaint }))
}
