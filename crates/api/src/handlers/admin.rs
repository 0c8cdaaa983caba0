use std::sync::Arc;

use axum::extract::State;
use campus_core::models::hostel::OccupancyCorrection;
use serde::Serialize;

use crate::ApiState;
use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct ReconcileBody {
    pub corrections: Vec<OccupancyCorrection>,
}

/// Recomputes every room's occupied counter from its active allotments.
#[axum::debug_handler]
pub async fn reconcile_occupancy(State(state): State<Arc<ApiState>>) -> ApiResult<ReconcileBody> {
    let corrections = state.db.reconcile_occupancy().await?;
    Ok(ApiResponse::with_message(
        format!("{} room(s) corrected", corrections.len()),
        ReconcileBody { corrections },
    ))
}
