//! Hostels, rooms and wardens.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::hostel::{
    AssignWardenRequest, CreateHostelRequest, CreateRoomRequest, HostelDetail, HostelLedger,
    RoomDetail, UpdateAssetsRequest, UpdateHostelStatusRequest, Warden,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::found;
use crate::response::{ApiResponse, ApiResult, CreatedResult};

#[derive(Debug, Serialize)]
pub struct HostelBody {
    pub hostel: HostelDetail,
}

#[derive(Debug, Serialize)]
pub struct RoomBody {
    pub room: RoomDetail,
}

#[derive(Debug, Serialize)]
pub struct WardenBody {
    pub warden: Warden,
}

#[axum::debug_handler]
pub async fn create_hostel(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateHostelRequest>,
) -> CreatedResult<HostelBody> {
    payload.validate()?;
    let hostel = state.db.create_hostel(payload.into_hostel()).await?;
    tracing::info!("Created hostel {}", hostel.name);

    Ok(ApiResponse::created(
        "Hostel created",
        HostelBody {
            hostel: HostelDetail {
                hostel,
                ledger: HostelLedger::default(),
            },
        },
    ))
}

/// The ledger is summed from the hostel's rooms on every read.
#[axum::debug_handler]
pub async fn get_hostel(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<HostelBody> {
    let hostel = found(state.db.get_hostel(id).await?, "Hostel", id)?;
    let ledger = state.db.hostel_ledger(id).await?;
    Ok(ApiResponse::ok(HostelBody {
        hostel: HostelDetail { hostel, ledger },
    }))
}

#[axum::debug_handler]
pub async fn update_hostel_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHostelStatusRequest>,
) -> ApiResult<HostelBody> {
    let hostel = state.db.update_hostel_status(id, payload.status).await?;
    let ledger = state.db.hostel_ledger(id).await?;
    tracing::info!("Hostel {} is now {}", hostel.name, hostel.status.as_str());

    Ok(ApiResponse::with_message(
        "Hostel status updated",
        HostelBody {
            hostel: HostelDetail { hostel, ledger },
        },
    ))
}

#[axum::debug_handler]
pub async fn create_room(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> CreatedResult<RoomBody> {
    payload.validate()?;
    found(state.db.get_hostel(payload.hostel_id).await?, "Hostel", payload.hostel_id)?;

    let room = state.db.create_room(payload.into_room()).await?;
    Ok(ApiResponse::created(
        "Room created",
        RoomBody {
            room: RoomDetail {
                room,
                students: Vec::new(),
            },
        },
    ))
}

#[axum::debug_handler]
pub async fn get_room(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<RoomBody> {
    let room = found(state.db.get_room(id).await?, "Room", id)?;
    let students = state.db.room_occupants(id).await?;
    Ok(ApiResponse::ok(RoomBody {
        room: RoomDetail { room, students },
    }))
}

#[axum::debug_handler]
pub async fn update_room_assets(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAssetsRequest>,
) -> ApiResult<RoomBody> {
    let room = state.db.update_room_assets(id, payload.assets).await?;
    let students = state.db.room_occupants(id).await?;
    Ok(ApiResponse::with_message(
        "Room assets updated",
        RoomBody {
            room: RoomDetail { room, students },
        },
    ))
}

#[axum::debug_handler]
pub async fn assign_warden(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AssignWardenRequest>,
) -> CreatedResult<WardenBody> {
    found(state.db.get_faculty(payload.faculty_id).await?, "Faculty", payload.faculty_id)?;
    found(state.db.get_hostel(payload.hostel_id).await?, "Hostel", payload.hostel_id)?;

    let warden = state
        .db
        .assign_warden(Warden {
            id: Uuid::new_v4(),
            faculty_id: payload.faculty_id,
            hostel_id: payload.hostel_id,
            created_at: Utc::now(),
        })
        .await?;

    Ok(ApiResponse::created("Warden assigned", WardenBody { warden }))
}

#[axum::debug_handler]
pub async fn get_hostel_warden(
    State(state): State<Arc<ApiState>>,
    Path(hostel_id): Path<Uuid>,
) -> ApiResult<WardenBody> {
    let warden = state
        .db
        .warden_for_hostel(hostel_id)
        .await?
        .ok_or_else(|| {
            CampusError::NotFound(format!("No warden assigned to hostel {}", hostel_id))
        })?;
    Ok(ApiResponse::ok(WardenBody { warden }))
}
