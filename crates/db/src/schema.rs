use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Statements run in order; every one is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS students (
        id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        college_id VARCHAR(64) NOT NULL,
        email VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        gender VARCHAR(16) NOT NULL,
        department VARCHAR(128) NOT NULL,
        programme VARCHAR(128) NOT NULL,
        batch INTEGER NOT NULL,
        current_sem INTEGER NOT NULL DEFAULT 1,
        cgpa DOUBLE PRECISION NOT NULL DEFAULT 0,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_students_college_id UNIQUE (college_id),
        CONSTRAINT uq_students_email UNIQUE (email)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS grade_sheets (
        student_id UUID NOT NULL REFERENCES students(id),
        semester INTEGER NOT NULL,
        sgpa DOUBLE PRECISION NOT NULL,
        cgpa DOUBLE PRECISION NOT NULL,
        credits_offered INTEGER NOT NULL,
        credits_earned INTEGER NOT NULL,
        courses JSONB NOT NULL DEFAULT '[]',
        backlogs TEXT[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_grade_sheets_student_semester UNIQUE (student_id, semester)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS faculty (
        id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        employee_id VARCHAR(64) NOT NULL,
        designation VARCHAR(32) NOT NULL,
        department VARCHAR(128) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_faculty_email UNIQUE (email),
        CONSTRAINT uq_faculty_employee_id UNIQUE (employee_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id UUID PRIMARY KEY,
        code VARCHAR(32) NOT NULL,
        name VARCHAR(255) NOT NULL,
        credits INTEGER NOT NULL CHECK (credits > 0),
        course_type VARCHAR(16) NOT NULL,
        syllabus TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_courses_code UNIQUE (code)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS course_offerings (
        id UUID PRIMARY KEY,
        course_id UUID NOT NULL REFERENCES courses(id),
        semester INTEGER NOT NULL,
        year INTEGER NOT NULL,
        branches TEXT[] NOT NULL DEFAULT '{}',
        coordinator_id UUID NOT NULL REFERENCES faculty(id),
        instructor_ids UUID[] NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS enrollments (
        id UUID PRIMARY KEY,
        student_id UUID NOT NULL REFERENCES students(id),
        offering_id UUID NOT NULL REFERENCES course_offerings(id),
        faculty_id UUID NULL REFERENCES faculty(id),
        schedule JSONB NOT NULL DEFAULT '[]',
        status VARCHAR(32) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_enrollments_student_offering UNIQUE (student_id, offering_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id UUID PRIMARY KEY,
        enrollment_id UUID NOT NULL REFERENCES enrollments(id),
        date DATE NOT NULL,
        status VARCHAR(16) NOT NULL,
        CONSTRAINT uq_attendance_enrollment_date UNIQUE (enrollment_id, date)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS grades (
        id UUID PRIMARY KEY,
        enrollment_id UUID NOT NULL REFERENCES enrollments(id),
        assignments DOUBLE PRECISION NOT NULL,
        midsem DOUBLE PRECISION NOT NULL,
        endsem DOUBLE PRECISION NOT NULL,
        quiz DOUBLE PRECISION NOT NULL,
        project DOUBLE PRECISION NOT NULL,
        total DOUBLE PRECISION NOT NULL,
        letter_grade VARCHAR(4) NOT NULL,
        grade_points INTEGER NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_grades_enrollment UNIQUE (enrollment_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hostels (
        id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        hostel_type VARCHAR(16) NOT NULL,
        status VARCHAR(16) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_hostels_name UNIQUE (name)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rooms (
        id UUID PRIMARY KEY,
        hostel_id UUID NOT NULL REFERENCES hostels(id),
        formatted_room VARCHAR(64) NOT NULL,
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        occupied INTEGER NOT NULL DEFAULT 0,
        assets JSONB NOT NULL DEFAULT '[]',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_rooms_hostel_room UNIQUE (hostel_id, formatted_room),
        CONSTRAINT rooms_occupied_non_negative CHECK (occupied >= 0)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS wardens (
        id UUID PRIMARY KEY,
        faculty_id UUID NOT NULL REFERENCES faculty(id),
        hostel_id UUID NOT NULL REFERENCES hostels(id),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_wardens_hostel UNIQUE (hostel_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS willingness (
        id UUID PRIMARY KEY,
        student_id UUID NOT NULL REFERENCES students(id),
        year INTEGER NOT NULL,
        status VARCHAR(16) NOT NULL,
        remarks TEXT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_willingness_student_year UNIQUE (student_id, year)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS room_allotments (
        id UUID PRIMARY KEY,
        student_id UUID NOT NULL REFERENCES students(id),
        hostel_id UUID NOT NULL REFERENCES hostels(id),
        room_id UUID NOT NULL REFERENCES rooms(id),
        year INTEGER NOT NULL,
        willingness_id UUID NOT NULL REFERENCES willingness(id),
        status VARCHAR(16) NOT NULL,
        allotted_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        vacated_at TIMESTAMP WITH TIME ZONE NULL
    );
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uq_allotments_active
        ON room_allotments(student_id, year) WHERE status = 'Allotted';
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS complaints (
        id UUID PRIMARY KEY,
        student_id UUID NOT NULL REFERENCES students(id),
        hostel_id UUID NOT NULL REFERENCES hostels(id),
        room_id UUID NULL REFERENCES rooms(id),
        category VARCHAR(32) NOT NULL,
        description TEXT NOT NULL,
        status VARCHAR(16) NOT NULL,
        remarks TEXT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        resolved_at TIMESTAMP WITH TIME ZONE NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS settings (
        id VARCHAR(64) PRIMARY KEY,
        is_registration_open BOOLEAN NOT NULL DEFAULT FALSE,
        are_grade_sheets_visible BOOLEAN NOT NULL DEFAULT FALSE,
        maintenance_mode BOOLEAN NOT NULL DEFAULT FALSE,
        announcement TEXT NOT NULL DEFAULT '',
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS academic_calendars (
        id UUID PRIMARY KEY,
        year INTEGER NOT NULL,
        semester INTEGER NOT NULL,
        registration_start DATE NOT NULL,
        registration_end DATE NOT NULL,
        classes_start DATE NOT NULL,
        classes_end DATE NOT NULL,
        exams_start DATE NOT NULL,
        exams_end DATE NOT NULL,
        holidays JSONB NOT NULL DEFAULT '[]',
        CONSTRAINT uq_calendars_year_semester UNIQUE (year, semester)
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_enrollments_offering_id ON enrollments(offering_id);",
    "CREATE INDEX IF NOT EXISTS idx_enrollments_student_id ON enrollments(student_id);",
    "CREATE INDEX IF NOT EXISTS idx_attendance_enrollment_id ON attendance(enrollment_id);",
    "CREATE INDEX IF NOT EXISTS idx_rooms_hostel_id ON rooms(hostel_id);",
    "CREATE INDEX IF NOT EXISTS idx_allotments_room_id ON room_allotments(room_id);",
    "CREATE INDEX IF NOT EXISTS idx_willingness_year_status ON willingness(year, status);",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    // The settings document always exists.
    sqlx::query(
        r#"
        INSERT INTO settings (id) VALUES ($1)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(campus_core::models::settings::GLOBAL_SETTINGS_ID)
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
