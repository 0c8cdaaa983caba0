//! Success envelope. Every successful response is
//! `{ "success": true, "message"?: "...", ...payload }`.

use axum::{Json, http::StatusCode};
use serde::Serialize;

use crate::middleware::error_handling::AppError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data,
        })
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data,
        })
    }

    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::with_message(message, data))
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;
