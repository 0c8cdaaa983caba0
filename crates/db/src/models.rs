//! Row types as stored in Postgres, with conversions into domain types.
//!
//! Enum columns are plain text; parsing happens in `into_domain` so a bad row
//! surfaces as an error instead of a panic.

use campus_core::errors::CampusResult;
use campus_core::models::{
    academic::{Course, CourseOffering, Faculty},
    allotment::RoomAllotment,
    attendance::Attendance,
    calendar::{AcademicCalendar, DateRange, Holiday},
    complaint::Complaint,
    enrollment::{Enrollment, ScheduleSlot},
    grade::{ComponentMarks, Grade},
    hostel::{Hostel, Room, RoomAsset, Warden},
    settings::Settings,
    student::{GradeSheet, GradeSheetEntry, Student},
    willingness::Willingness,
};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct DbStudent {
    pub id: Uuid,
    pub name: String,
    pub college_id: String,
    pub email: String,
    pub password_hash: String,
    pub gender: String,
    pub department: String,
    pub programme: String,
    pub batch: i32,
    pub current_sem: i32,
    pub cgpa: f64,
    pub created_at: DateTime<Utc>,
}

impl DbStudent {
    pub fn into_domain(self) -> CampusResult<Student> {
        Ok(Student {
            id: self.id,
            name: self.name,
            college_id: self.college_id,
            email: self.email,
            password_hash: self.password_hash,
            gender: self.gender.parse()?,
            department: self.department,
            programme: self.programme,
            batch: self.batch,
            current_sem: self.current_sem,
            cgpa: self.cgpa,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbGradeSheet {
    pub student_id: Uuid,
    pub semester: i32,
    pub sgpa: f64,
    pub cgpa: f64,
    pub credits_offered: i32,
    pub credits_earned: i32,
    pub courses: Json<Vec<GradeSheetEntry>>,
    pub backlogs: Vec<String>,
}

impl From<DbGradeSheet> for GradeSheet {
    fn from(row: DbGradeSheet) -> Self {
        GradeSheet {
            semester: row.semester,
            sgpa: row.sgpa,
            cgpa: row.cgpa,
            credits_offered: row.credits_offered,
            credits_earned: row.credits_earned,
            courses: row.courses.0,
            backlogs: row.backlogs,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbFaculty {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub designation: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

impl DbFaculty {
    pub fn into_domain(self) -> CampusResult<Faculty> {
        Ok(Faculty {
            id: self.id,
            name: self.name,
            email: self.email,
            employee_id: self.employee_id,
            designation: self.designation.parse()?,
            department: self.department,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbCourse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub course_type: String,
    pub syllabus: String,
    pub created_at: DateTime<Utc>,
}

impl DbCourse {
    pub fn into_domain(self) -> CampusResult<Course> {
        Ok(Course {
            id: self.id,
            code: self.code,
            name: self.name,
            credits: self.credits,
            course_type: self.course_type.parse()?,
            syllabus: self.syllabus,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbCourseOffering {
    pub id: Uuid,
    pub course_id: Uuid,
    pub semester: i32,
    pub year: i32,
    pub branches: Vec<String>,
    pub coordinator_id: Uuid,
    pub instructor_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<DbCourseOffering> for CourseOffering {
    fn from(row: DbCourseOffering) -> Self {
        CourseOffering {
            id: row.id,
            course_id: row.course_id,
            semester: row.semester,
            year: row.year,
            branches: row.branches,
            coordinator_id: row.coordinator_id,
            instructor_ids: row.instructor_ids,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbEnrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub offering_id: Uuid,
    pub faculty_id: Option<Uuid>,
    pub schedule: Json<Vec<ScheduleSlot>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbEnrollment {
    pub fn into_domain(self) -> CampusResult<Enrollment> {
        Ok(Enrollment {
            id: self.id,
            student_id: self.student_id,
            offering_id: self.offering_id,
            faculty_id: self.faculty_id,
            schedule: self.schedule.0,
            status: self.status.parse()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbAttendance {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub date: NaiveDate,
    pub status: String,
}

impl DbAttendance {
    pub fn into_domain(self) -> CampusResult<Attendance> {
        Ok(Attendance {
            id: self.id,
            enrollment_id: self.enrollment_id,
            date: self.date,
            status: self.status.parse()?,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbGrade {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub assignments: f64,
    pub midsem: f64,
    pub endsem: f64,
    pub quiz: f64,
    pub project: f64,
    pub total: f64,
    pub letter_grade: String,
    pub grade_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbGrade {
    pub fn into_domain(self) -> CampusResult<Grade> {
        Ok(Grade {
            id: self.id,
            enrollment_id: self.enrollment_id,
            marks: ComponentMarks {
                assignments: self.assignments,
                midsem: self.midsem,
                endsem: self.endsem,
                quiz: self.quiz,
                project: self.project,
            },
            total: self.total,
            letter_grade: self.letter_grade.parse()?,
            grade_points: self.grade_points,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbHostel {
    pub id: Uuid,
    pub name: String,
    pub hostel_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl DbHostel {
    pub fn into_domain(self) -> CampusResult<Hostel> {
        Ok(Hostel {
            id: self.id,
            name: self.name,
            hostel_type: self.hostel_type.parse()?,
            status: self.status.parse()?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub formatted_room: String,
    pub capacity: i32,
    pub occupied: i32,
    pub assets: Json<Vec<RoomAsset>>,
    pub created_at: DateTime<Utc>,
}

impl From<DbRoom> for Room {
    fn from(row: DbRoom) -> Self {
        Room {
            id: row.id,
            hostel_id: row.hostel_id,
            formatted_room: row.formatted_room,
            capacity: row.capacity,
            occupied: row.occupied,
            assets: row.assets.0,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbWarden {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub hostel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<DbWarden> for Warden {
    fn from(row: DbWarden) -> Self {
        Warden {
            id: row.id,
            faculty_id: row.faculty_id,
            hostel_id: row.hostel_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbWillingness {
    pub id: Uuid,
    pub student_id: Uuid,
    pub year: i32,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbWillingness {
    pub fn into_domain(self) -> CampusResult<Willingness> {
        Ok(Willingness {
            id: self.id,
            student_id: self.student_id,
            year: self.year,
            status: self.status.parse()?,
            remarks: self.remarks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbRoomAllotment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Uuid,
    pub year: i32,
    pub willingness_id: Uuid,
    pub status: String,
    pub allotted_at: DateTime<Utc>,
    pub vacated_at: Option<DateTime<Utc>>,
}

impl DbRoomAllotment {
    pub fn into_domain(self) -> CampusResult<RoomAllotment> {
        Ok(RoomAllotment {
            id: self.id,
            student_id: self.student_id,
            hostel_id: self.hostel_id,
            room_id: self.room_id,
            year: self.year,
            willingness_id: self.willingness_id,
            status: self.status.parse()?,
            allotted_at: self.allotted_at,
            vacated_at: self.vacated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbComplaint {
    pub id: Uuid,
    pub student_id: Uuid,
    pub hostel_id: Uuid,
    pub room_id: Option<Uuid>,
    pub category: String,
    pub description: String,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl DbComplaint {
    pub fn into_domain(self) -> CampusResult<Complaint> {
        Ok(Complaint {
            id: self.id,
            student_id: self.student_id,
            hostel_id: self.hostel_id,
            room_id: self.room_id,
            category: self.category.parse()?,
            description: self.description,
            status: self.status.parse()?,
            remarks: self.remarks,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbSettings {
    pub id: String,
    pub is_registration_open: bool,
    pub are_grade_sheets_visible: bool,
    pub maintenance_mode: bool,
    pub announcement: String,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSettings> for Settings {
    fn from(row: DbSettings) -> Self {
        Settings {
            is_registration_open: row.is_registration_open,
            are_grade_sheets_visible: row.are_grade_sheets_visible,
            maintenance_mode: row.maintenance_mode,
            announcement: row.announcement,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbAcademicCalendar {
    pub id: Uuid,
    pub year: i32,
    pub semester: i32,
    pub registration_start: NaiveDate,
    pub registration_end: NaiveDate,
    pub classes_start: NaiveDate,
    pub classes_end: NaiveDate,
    pub exams_start: NaiveDate,
    pub exams_end: NaiveDate,
    pub holidays: Json<Vec<Holiday>>,
}

impl From<DbAcademicCalendar> for AcademicCalendar {
    fn from(row: DbAcademicCalendar) -> Self {
        AcademicCalendar {
            id: row.id,
            year: row.year,
            semester: row.semester,
            registration: DateRange {
                start: row.registration_start,
                end: row.registration_end,
            },
            classes: DateRange {
                start: row.classes_start,
                end: row.classes_end,
            },
            exams: DateRange {
                start: row.exams_start,
                end: row.exams_end,
            },
            holidays: row.holidays.0,
        }
    }
}
