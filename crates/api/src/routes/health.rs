use axum::{Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;
use crate::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

async fn health_check() -> ApiResult<HealthResponse> {
    Ok(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
    }))
}

async fn version() -> ApiResult<VersionResponse> {
    Ok(ApiResponse::ok(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
