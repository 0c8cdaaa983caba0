use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::models::willingness::{
    ReviewWillingnessRequest, SubmitWillingnessRequest, Willingness,
};
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::found;
use crate::response::{ApiResponse, ApiResult, CreatedResult};

#[derive(Debug, Serialize)]
pub struct WillingnessBody {
    pub willingness: Willingness,
}

#[axum::debug_handler]
pub async fn submit_willingness(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SubmitWillingnessRequest>,
) -> CreatedResult<WillingnessBody> {
    payload.validate()?;
    found(
        state.db.get_student(payload.student_id).await?,
        "Student",
        payload.student_id,
    )?;

    let willingness = state
        .db
        .create_willingness(Willingness::submitted(payload.student_id, payload.year))
        .await?;

    Ok(ApiResponse::created(
        "Willingness submitted",
        WillingnessBody { willingness },
    ))
}

#[axum::debug_handler]
pub async fn review_willingness(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewWillingnessRequest>,
) -> ApiResult<WillingnessBody> {
    let willingness = state
        .db
        .review_willingness(id, payload.status, payload.remarks)
        .await?;
    tracing::info!(
        "Willingness {} for {} is {}",
        willingness.id,
        willingness.year,
        willingness.status.as_str()
    );

    Ok(ApiResponse::with_message(
        format!("Willingness {}", willingness.status.as_str().to_lowercase()),
        WillingnessBody { willingness },
    ))
}

#[axum::debug_handler]
pub async fn get_willingness(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<WillingnessBody> {
    let willingness = found(state.db.get_willingness(id).await?, "Willingness", id)?;
    Ok(ApiResponse::ok(WillingnessBody { willingness }))
}
