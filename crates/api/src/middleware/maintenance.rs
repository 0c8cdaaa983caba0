//! Maintenance gate. While `maintenanceMode` is on, every mutating request
//! is refused with 503, except on the settings and admin surfaces, which
//! are needed to turn it back off.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::ApiState;
use crate::middleware::error_handling::{AppError, failure};

const EXEMPT_PREFIXES: &[&str] = &["/settings", "/admin"];

fn is_exempt(method: &Method, path: &str) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
        || EXEMPT_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
}

pub async fn maintenance_guard(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Response {
    if is_exempt(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    match state.flags.current().await {
        Ok(settings) if settings.maintenance_mode => {
            tracing::debug!(
                "Refused {} {} during maintenance",
                request.method(),
                request.uri().path()
            );
            failure(
                StatusCode::SERVICE_UNAVAILABLE,
                "System is under maintenance, please try again later",
            )
        }
        Ok(_) => next.run(request).await,
        Err(err) => AppError(err).into_response(),
    }
}
