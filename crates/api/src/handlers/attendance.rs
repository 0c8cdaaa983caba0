use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::{
    attendance::{
        Attendance, AttendanceSummary, DEFAULT_SHORTAGE_THRESHOLD, MarkAttendanceRequest,
        ShortageRequest,
    },
    calendar::AcademicCalendar,
    enrollment::EnrollmentStatus,
};
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::found;
use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct AttendanceBody {
    pub attendance: Vec<Attendance>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBody {
    pub enrollment_id: Uuid,
    #[serde(flatten)]
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortageBody {
    pub threshold: f64,
    pub affected: Vec<Uuid>,
}

/// Records one day of attendance. Records for the same enrollment and date
/// overwrite each other.
#[axum::debug_handler]
pub async fn mark_attendance(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<MarkAttendanceRequest>,
) -> ApiResult<AttendanceBody> {
    if payload.records.is_empty() {
        return Err(CampusError::Validation("No attendance records supplied".to_string()).into());
    }

    // Calendars looked up once per offering.
    let mut calendars: HashMap<Uuid, Option<AcademicCalendar>> = HashMap::new();
    let mut records = Vec::with_capacity(payload.records.len());

    for entry in payload.records {
        let enrollment = found(
            state.db.get_enrollment(entry.enrollment_id).await?,
            "Enrollment",
            entry.enrollment_id,
        )?;
        if enrollment.status != EnrollmentStatus::Approved {
            return Err(CampusError::Validation(format!(
                "Attendance can only be marked for approved enrollments; {} is {}",
                enrollment.id, enrollment.status
            ))
            .into());
        }

        if !calendars.contains_key(&enrollment.offering_id) {
            let offering = found(
                state.db.get_offering(enrollment.offering_id).await?,
                "Offering",
                enrollment.offering_id,
            )?;
            let calendar = state.db.get_calendar(offering.year, offering.semester).await?;
            calendars.insert(offering.id, calendar);
        }
        let holiday = calendars
            .get(&enrollment.offering_id)
            .and_then(|calendar| calendar.as_ref())
            .and_then(|calendar| calendar.holiday_on(payload.date));
        if let Some(holiday) = holiday {
            return Err(CampusError::Validation(format!(
                "{} is a holiday ({})",
                payload.date, holiday.name
            ))
            .into());
        }

        records.push(Attendance {
            id: Uuid::new_v4(),
            enrollment_id: enrollment.id,
            date: payload.date,
            status: entry.status,
        });
    }

    let attendance = state.db.record_attendance(records).await?;
    Ok(ApiResponse::with_message(
        format!("Attendance recorded for {}", payload.date),
        AttendanceBody { attendance },
    ))
}

#[axum::debug_handler]
pub async fn attendance_summary(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<SummaryBody> {
    found(state.db.get_enrollment(id).await?, "Enrollment", id)?;
    let records = state.db.attendance_for_enrollment(id).await?;

    Ok(ApiResponse::ok(SummaryBody {
        enrollment_id: id,
        summary: AttendanceSummary::from_records(&records),
    }))
}

/// Fails every approved enrollment of the offering whose attendance is
/// below the threshold. Enrollments without any records are left alone.
#[axum::debug_handler]
pub async fn flag_shortage(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ShortageRequest>,
) -> ApiResult<ShortageBody> {
    let threshold = payload.threshold.unwrap_or(DEFAULT_SHORTAGE_THRESHOLD);
    if !(0.0..=100.0).contains(&threshold) {
        return Err(CampusError::Validation("threshold must be between 0 and 100".to_string()).into());
    }
    found(
        state.db.get_offering(payload.offering_id).await?,
        "Offering",
        payload.offering_id,
    )?;

    let mut affected = Vec::new();
    for enrollment in state.db.enrollments_for_offering(payload.offering_id).await? {
        if enrollment.status != EnrollmentStatus::Approved {
            continue;
        }
        let records = state.db.attendance_for_enrollment(enrollment.id).await?;
        if AttendanceSummary::from_records(&records).is_short_of(threshold) {
            affected.push(enrollment.id);
        }
    }

    if !affected.is_empty() {
        state
            .db
            .transition_enrollments(affected.clone(), EnrollmentStatus::AttendanceFailure)
            .await?;
        tracing::info!(
            "Flagged {} enrollment(s) of offering {} below {}% attendance",
            affected.len(),
            payload.offering_id,
            threshold
        );
    }

    Ok(ApiResponse::with_message(
        format!("{} enrollment(s) marked as attendance failure", affected.len()),
        ShortageBody {
            threshold,
            affected,
        },
    ))
}
