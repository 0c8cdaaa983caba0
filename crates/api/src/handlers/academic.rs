//! Faculty, courses and course offerings.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::models::{
    academic::{
        Course, CourseOffering, CreateCourseRequest, CreateFacultyRequest, CreateOfferingRequest,
        Faculty,
    },
    enrollment::Enrollment,
};
use serde::Serialize;
use uuid::Uuid;

use crate::ApiState;
use crate::handlers::found;
use crate::response::{ApiResponse, ApiResult, CreatedResult};

#[derive(Debug, Serialize)]
pub struct FacultyBody {
    pub faculty: Faculty,
}

#[derive(Debug, Serialize)]
pub struct CourseBody {
    pub course: Course,
}

#[derive(Debug, Serialize)]
pub struct OfferingBody {
    pub offering: CourseOffering,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentsBody {
    pub enrollments: Vec<Enrollment>,
}

#[axum::debug_handler]
pub async fn create_faculty(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateFacultyRequest>,
) -> CreatedResult<FacultyBody> {
    payload.validate()?;
    let faculty = state.db.create_faculty(payload.into_faculty()).await?;
    Ok(ApiResponse::created("Faculty created", FacultyBody { faculty }))
}

#[axum::debug_handler]
pub async fn get_faculty(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<FacultyBody> {
    let faculty = found(state.db.get_faculty(id).await?, "Faculty", id)?;
    Ok(ApiResponse::ok(FacultyBody { faculty }))
}

#[axum::debug_handler]
pub async fn create_course(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCourseRequest>,
) -> CreatedResult<CourseBody> {
    payload.validate()?;
    let course = state.db.create_course(payload.into_course()).await?;
    Ok(ApiResponse::created("Course created", CourseBody { course }))
}

#[axum::debug_handler]
pub async fn get_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<CourseBody> {
    let course = found(state.db.get_course(id).await?, "Course", id)?;
    Ok(ApiResponse::ok(CourseBody { course }))
}

/// The course, the coordinator and every instructor must already exist.
#[axum::debug_handler]
pub async fn create_offering(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateOfferingRequest>,
) -> CreatedResult<OfferingBody> {
    payload.validate()?;

    found(state.db.get_course(payload.course_id).await?, "Course", payload.course_id)?;
    found(
        state.db.get_faculty(payload.coordinator_id).await?,
        "Faculty",
        payload.coordinator_id,
    )?;
    for instructor_id in &payload.instructor_ids {
        found(state.db.get_faculty(*instructor_id).await?, "Faculty", *instructor_id)?;
    }

    let offering = state.db.create_offering(payload.into_offering()).await?;
    tracing::info!(
        "Created offering {} for semester {} of {}",
        offering.id,
        offering.semester,
        offering.year
    );

    Ok(ApiResponse::created("Course offering created", OfferingBody { offering }))
}

#[axum::debug_handler]
pub async fn get_offering(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<OfferingBody> {
    let offering = found(state.db.get_offering(id).await?, "Offering", id)?;
    Ok(ApiResponse::ok(OfferingBody { offering }))
}

#[axum::debug_handler]
pub async fn offering_enrollments(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<EnrollmentsBody> {
    found(state.db.get_offering(id).await?, "Offering", id)?;
    let enrollments = state.db.enrollments_for_offering(id).await?;
    Ok(ApiResponse::ok(EnrollmentsBody { enrollments }))
}
