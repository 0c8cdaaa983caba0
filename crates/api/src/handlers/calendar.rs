use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::calendar::{AcademicCalendar, UpsertCalendarRequest};
use serde::Serialize;

use crate::ApiState;
use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct CalendarBody {
    pub calendar: AcademicCalendar,
}

/// Creates or replaces the calendar for a (year, semester).
#[axum::debug_handler]
pub async fn upsert_calendar(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpsertCalendarRequest>,
) -> ApiResult<CalendarBody> {
    payload.validate()?;
    let calendar = state.db.upsert_calendar(payload.into_calendar()).await?;
    tracing::info!(
        "Calendar saved for {} semester {}",
        calendar.year,
        calendar.semester
    );
    Ok(ApiResponse::with_message("Academic calendar saved", CalendarBody { calendar }))
}

#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Path((year, semester)): Path<(i32, i32)>,
) -> ApiResult<CalendarBody> {
    let calendar = state
        .db
        .get_calendar(year, semester)
        .await?
        .ok_or_else(|| {
            CampusError::NotFound(format!(
                "No academic calendar for {} semester {}",
                year, semester
            ))
        })?;
    Ok(ApiResponse::ok(CalendarBody { calendar }))
}
