//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and the JSON failure envelope
//! `{ "success": false, "message": "..." }` used across the whole API.
//! Storage and internal failures are logged here and reach the client only
//! as a generic message.

use axum::{
    BoxError, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_core::errors::CampusError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything yielding a
/// [`CampusError`].
#[derive(Debug)]
pub struct AppError(pub CampusError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CampusError::NotFound(_) => StatusCode::NOT_FOUND,
            CampusError::Validation(_) => StatusCode::BAD_REQUEST,
            CampusError::Conflict(_) => StatusCode::CONFLICT,
            CampusError::InvalidTransition { .. } => StatusCode::CONFLICT,
            CampusError::FeatureDisabled(_) => StatusCode::FORBIDDEN,
            CampusError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CampusError::Upstream(_) => StatusCode::BAD_GATEWAY,
            CampusError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CampusError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self.0 {
            CampusError::Database(_) | CampusError::Internal(_) => {
                tracing::error!("Request failed: {:?}", self.0);
            }
            CampusError::Upstream(_) | CampusError::Unavailable(_) => {
                tracing::warn!("Request failed: {}", self.0);
            }
            _ => tracing::debug!("Request rejected: {}", self.0),
        }

        failure(status, self.0.public_message())
    }
}

/// Automatic conversion from CampusError to AppError
impl From<CampusError> for AppError {
    fn from(err: CampusError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Reports come from infrastructure code, so they surface as internal errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CampusError::Database(err))
    }
}

/// Builds the failure envelope with the given status.
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(json!({ "success": false, "message": message.into() }));
    (status, body).into_response()
}

/// Turns errors raised by tower layers (the request timeout) into the envelope.
pub async fn handle_layer_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        failure(StatusCode::REQUEST_TIMEOUT, "Request timed out")
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong, please try again later",
        )
    }
}
