use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::{
    enrollment::EnrollmentStatus,
    grade::{Grade, SubmitGradeRequest},
};
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::found;
use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBody {
    pub grade: Grade,
    pub enrollment_status: EnrollmentStatus,
}

/// Grades an enrollment with its course type's weighting. A passing grade
/// completes the enrollment; an F sends it to Supplementary.
#[axum::debug_handler]
pub async fn submit_grade(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SubmitGradeRequest>,
) -> ApiResult<GradeBody> {
    payload.marks.validate()?;

    let enrollment = found(
        state.db.get_enrollment(payload.enrollment_id).await?,
        "Enrollment",
        payload.enrollment_id,
    )?;
    if !matches!(
        enrollment.status,
        EnrollmentStatus::Approved | EnrollmentStatus::Supplementary | EnrollmentStatus::Completed
    ) {
        return Err(CampusError::Validation(format!(
            "Cannot grade an enrollment that is {}",
            enrollment.status
        ))
        .into());
    }

    let offering = found(
        state.db.get_offering(enrollment.offering_id).await?,
        "Offering",
        enrollment.offering_id,
    )?;
    let course = found(
        state.db.get_course(offering.course_id).await?,
        "Course",
        offering.course_id,
    )?;

    let grade = Grade::compute(enrollment.id, course.course_type, payload.marks);
    let enrollment_status = if grade.letter_grade.is_pass() {
        EnrollmentStatus::Completed
    } else {
        EnrollmentStatus::Supplementary
    };

    let grade = state.db.save_grade(grade, enrollment_status).await?;
    tracing::info!(
        "Graded enrollment {} in {}: {} ({})",
        enrollment.id,
        course.code,
        grade.total,
        grade.letter_grade.as_str()
    );

    Ok(ApiResponse::with_message(
        "Grade saved",
        GradeBody {
            grade,
            enrollment_status,
        },
    ))
}

#[derive(Debug, Serialize)]
pub struct StoredGradeBody {
    pub grade: Grade,
}

#[axum::debug_handler]
pub async fn get_grade(
    State(state): State<Arc<ApiState>>,
    Path(enrollment_id): Path<Uuid>,
) -> ApiResult<StoredGradeBody> {
    let grade = state
        .db
        .grade_for_enrollment(enrollment_id)
        .await?
        .ok_or_else(|| {
            CampusError::NotFound(format!("No grade recorded for enrollment {}", enrollment_id))
        })?;
    Ok(ApiResponse::ok(StoredGradeBody { grade }))
}
