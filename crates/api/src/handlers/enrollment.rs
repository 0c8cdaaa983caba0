//! Enrollment workflow: registration, faculty assignment and status moves.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::enrollment::{
    AssignFacultyRequest, BulkEnrollRequest, ChangeStatusRequest, Enrollment, EnrollmentStatus,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::{academic::EnrollmentsBody, found};
use crate::response::{ApiResponse, ApiResult, CreatedResult};

#[derive(Debug, Serialize)]
pub struct EnrollmentBody {
    pub enrollment: Enrollment,
}

/// Registers a student for several offerings at once.
///
/// Registration must be open in settings, and where the offering's term has a
/// calendar, today must fall inside its registration window.
#[axum::debug_handler]
pub async fn bulk_enroll(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BulkEnrollRequest>,
) -> CreatedResult<EnrollmentsBody> {
    if payload.offering_ids.is_empty() {
        return Err(CampusError::Validation("No offerings selected".to_string()).into());
    }
    state.flags.require_registration_open().await?;

    let student = found(
        state.db.get_student(payload.student_id).await?,
        "Student",
        payload.student_id,
    )?;
    let today = Utc::now().date_naive();

    let mut enrollments = Vec::with_capacity(payload.offering_ids.len());
    for offering_id in payload.offering_ids {
        let offering = found(state.db.get_offering(offering_id).await?, "Offering", offering_id)?;

        if let Some(calendar) = state.db.get_calendar(offering.year, offering.semester).await? {
            if !calendar.is_registration_open_on(today) {
                return Err(CampusError::FeatureDisabled(format!(
                    "Registration for semester {} of {} runs from {} to {}",
                    offering.semester,
                    offering.year,
                    calendar.registration.start,
                    calendar.registration.end
                ))
                .into());
            }
        }

        if !offering.admits_branch(&student.department) {
            return Err(CampusError::Validation(format!(
                "Offering {} is not open to the {} department",
                offering.id, student.department
            ))
            .into());
        }

        enrollments.push(Enrollment::selected(student.id, offering.id));
    }

    let enrollments = state.db.create_enrollments(enrollments).await?;
    tracing::info!(
        "Student {} selected {} offering(s)",
        student.college_id,
        enrollments.len()
    );

    Ok(ApiResponse::created(
        "Courses selected",
        EnrollmentsBody { enrollments },
    ))
}

/// Assigns a faculty member and a schedule to a batch of enrollments of one
/// offering, approving them.
#[axum::debug_handler]
pub async fn assign_faculty(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AssignFacultyRequest>,
) -> ApiResult<EnrollmentsBody> {
    payload.validate()?;

    let offering = found(
        state.db.get_offering(payload.offering_id).await?,
        "Offering",
        payload.offering_id,
    )?;
    if !offering.has_instructor(payload.faculty_id) {
        return Err(CampusError::Validation(
            "Selected faculty does not belong to this offering.".to_string(),
        )
        .into());
    }

    let enrollments = state.db.assign_enrollments(payload).await?;
    Ok(ApiResponse::with_message(
        "Faculty and schedule assigned",
        EnrollmentsBody { enrollments },
    ))
}

#[axum::debug_handler]
pub async fn change_status(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ChangeStatusRequest>,
) -> ApiResult<EnrollmentsBody> {
    if payload.enrollment_ids.is_empty() {
        return Err(CampusError::Validation("No enrollments selected".to_string()).into());
    }
    if !payload.status.is_manually_settable() {
        let route = match payload.status {
            EnrollmentStatus::Completed | EnrollmentStatus::Supplementary => {
                "is recorded by submitting a grade"
            }
            EnrollmentStatus::Approved => "is set by assigning faculty",
            _ => "is set by registration",
        };
        return Err(CampusError::Validation(format!(
            "Status {} {}",
            payload.status, route
        ))
        .into());
    }

    let enrollments = state
        .db
        .transition_enrollments(payload.enrollment_ids, payload.status)
        .await?;
    Ok(ApiResponse::with_message(
        format!("{} enrollment(s) moved to {}", enrollments.len(), payload.status),
        EnrollmentsBody { enrollments },
    ))
}

#[axum::debug_handler]
pub async fn drop_enrollment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<EnrollmentBody> {
    let enrollment = state
        .db
        .transition_enrollments(vec![id], EnrollmentStatus::Dropped)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| CampusError::not_found("Enrollment", id))?;

    Ok(ApiResponse::with_message("Enrollment dropped", EnrollmentBody { enrollment }))
}

#[axum::debug_handler]
pub async fn get_enrollment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<EnrollmentBody> {
    let enrollment = found(state.db.get_enrollment(id).await?, "Enrollment", id)?;
    Ok(ApiResponse::ok(EnrollmentBody { enrollment }))
}
