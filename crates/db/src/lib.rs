//! Persistence for the campus backend.
//!
//! Each aggregate gets a repository trait under [`repositories`]. [`PgStore`]
//! implements all of them over Postgres; [`mock::MemoryStore`] implements them
//! in memory for tests. Handlers only see `dyn Database`.

pub mod mock;
pub mod models;
pub mod repositories;
pub mod schema;

use campus_core::errors::CampusError;
use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use repositories::{
    allotment::AllotmentRepository, attendance::AttendanceRepository,
    calendar::CalendarRepository, complaint::ComplaintRepository, course::CourseRepository,
    enrollment::EnrollmentRepository, faculty::FacultyRepository, grade::GradeRepository,
    hostel::HostelRepository, settings::SettingsRepository, student::StudentRepository,
    willingness::WillingnessRepository,
};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Every repository the API needs, behind one object.
pub trait Database:
    StudentRepository
    + FacultyRepository
    + CourseRepository
    + EnrollmentRepository
    + AttendanceRepository
    + GradeRepository
    + HostelRepository
    + WillingnessRepository
    + AllotmentRepository
    + ComplaintRepository
    + SettingsRepository
    + CalendarRepository
    + Send
    + Sync
{
}

impl<T> Database for T where
    T: StudentRepository
        + FacultyRepository
        + CourseRepository
        + EnrollmentRepository
        + AttendanceRepository
        + GradeRepository
        + HostelRepository
        + WillingnessRepository
        + AllotmentRepository
        + ComplaintRepository
        + SettingsRepository
        + CalendarRepository
        + Send
        + Sync
{
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Converts a driver error, turning unique-index violations into conflicts.
pub(crate) fn map_sqlx(err: sqlx::Error) -> CampusError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return CampusError::Conflict(conflict_message(db_err.constraint()));
        }
    }
    CampusError::Database(eyre::Report::new(err))
}

pub(crate) fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("uq_students_college_id") => "A student with this collegeId already exists",
        Some("uq_students_email") => "A student with this email already exists",
        Some("uq_faculty_email") => "A faculty member with this email already exists",
        Some("uq_faculty_employee_id") => "A faculty member with this employeeId already exists",
        Some("uq_courses_code") => "A course with this code already exists",
        Some("uq_enrollments_student_offering") => "Student is already enrolled in this offering",
        Some("uq_hostels_name") => "A hostel with this name already exists",
        Some("uq_rooms_hostel_room") => "This room already exists in the hostel",
        Some("uq_wardens_hostel") => "This hostel already has a warden",
        Some("uq_willingness_student_year") => "Willingness already submitted for this year",
        Some("uq_allotments_active") => "Student already allotted a room for this year",
        Some("uq_grade_sheets_student_semester") => "Grade sheet already exists for this semester",
        _ => "Record already exists",
    }
    .to_string()
}
