use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_core::errors::CampusError;
use campus_core::models::{
    enrollment::EnrollmentStatus,
    grade::{LetterGrade, build_grade_sheet},
    student::{CreateStudentRequest, GradeSheet, GradeSheetEntry, Student},
};
use serde::Serialize;
use uuid::Uuid;

use crate::handlers::found;
use crate::middleware::auth;
use crate::response::{ApiResponse, ApiResult, CreatedResult};
use crate::ApiState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBody {
    pub student: Student,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionBody {
    pub student: Student,
    pub grade_sheet: GradeSheet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSheetsBody {
    pub grade_sheets: Vec<GradeSheet>,
}

#[axum::debug_handler]
pub async fn create_student(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateStudentRequest>,
) -> CreatedResult<StudentBody> {
    payload.validate()?;

    let password_hash = auth::hash_password(&payload.password)?;
    let student = state.db.create_student(payload.into_student(password_hash)).await?;
    tracing::info!("Registered student {}", student.college_id);

    Ok(ApiResponse::created("Student registered", StudentBody { student }))
}

#[axum::debug_handler]
pub async fn get_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StudentBody> {
    let student = found(state.db.get_student(id).await?, "Student", id)?;
    Ok(ApiResponse::ok(StudentBody { student }))
}

/// Closes the student's current semester: builds its grade sheet from the
/// graded enrollments of that semester and moves the student on.
#[axum::debug_handler]
pub async fn promote_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<PromotionBody> {
    let student = found(state.db.get_student(id).await?, "Student", id)?;
    let semester = student.current_sem;

    let mut courses = Vec::new();
    for enrollment in state.db.enrollments_for_student(id).await? {
        let offering = found(
            state.db.get_offering(enrollment.offering_id).await?,
            "Offering",
            enrollment.offering_id,
        )?;
        if offering.semester != semester {
            continue;
        }
        if enrollment.status == EnrollmentStatus::Approved {
            return Err(CampusError::Validation(format!(
                "Enrollment {} in semester {} has not been graded yet",
                enrollment.id, semester
            ))
            .into());
        }
        if !enrollment.status.is_graded_outcome() {
            continue;
        }

        let course = found(
            state.db.get_course(offering.course_id).await?,
            "Course",
            offering.course_id,
        )?;
        let grade = state.db.grade_for_enrollment(enrollment.id).await?;

        let (letter_grade, grade_points) = match (&grade, enrollment.status) {
            (_, EnrollmentStatus::AttendanceFailure) => (LetterGrade::F, 0),
            (Some(grade), _) => (grade.letter_grade, grade.grade_points),
            (None, status) => {
                return Err(CampusError::Validation(format!(
                    "Enrollment {} is {} but has no grade",
                    enrollment.id, status
                ))
                .into());
            }
        };

        courses.push(GradeSheetEntry {
            enrollment_id: enrollment.id,
            grade_id: grade.map(|g| g.id),
            course_code: course.code,
            credits: course.credits,
            letter_grade: letter_grade.as_str().to_string(),
            grade_points,
        });
    }

    if courses.is_empty() {
        return Err(CampusError::Validation(format!(
            "No graded courses found for semester {}",
            semester
        ))
        .into());
    }

    let previous = state.db.grade_sheets(id).await?;
    let grade_sheet = build_grade_sheet(semester, courses, &previous);
    let student = state.db.promote_student(id, grade_sheet.clone()).await?;
    tracing::info!(
        "Promoted {} to semester {} (sgpa {}, cgpa {})",
        student.college_id,
        student.current_sem,
        grade_sheet.sgpa,
        grade_sheet.cgpa
    );

    Ok(ApiResponse::with_message(
        format!("Semester {} closed", semester),
        PromotionBody {
            student,
            grade_sheet,
        },
    ))
}

#[axum::debug_handler]
pub async fn get_grade_sheets(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<GradeSheetsBody> {
    state.flags.require_grade_sheets_visible().await?;
    found(state.db.get_student(id).await?, "Student", id)?;

    let grade_sheets = state.db.grade_sheets(id).await?;
    Ok(ApiResponse::ok(GradeSheetsBody { grade_sheets }))
}
