use std::sync::Arc;

use axum::{Json, extract::State};
use campus_core::models::settings::{Settings, UpdateSettingsRequest};
use serde::Serialize;

use crate::ApiState;
use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct SettingsBody {
    pub settings: Settings,
}

#[axum::debug_handler]
pub async fn get_settings(State(state): State<Arc<ApiState>>) -> ApiResult<SettingsBody> {
    let settings = state.flags.current().await?;
    Ok(ApiResponse::ok(SettingsBody { settings }))
}

/// Applies a partial update; absent fields keep their stored value.
#[axum::debug_handler]
pub async fn update_settings(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> ApiResult<SettingsBody> {
    let settings = state.flags.update(payload).await?;
    Ok(ApiResponse::with_message("Settings updated", SettingsBody { settings }))
}
