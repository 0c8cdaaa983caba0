//! In-memory implementation of every repository.
//!
//! One mutex guards all tables, so each call runs as a single critical
//! section and multi-entity writes are all-or-nothing, as they are in the
//! Postgres transactions.

use std::collections::HashMap;

use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::{
    academic::{Course, CourseOffering, Faculty},
    allotment::{AllotRoomRequest, AllotmentCandidate, AllotmentStatus, PolicyRoom, PolicyStudent, RoomAllotment},
    attendance::Attendance,
    calendar::AcademicCalendar,
    complaint::{Complaint, ComplaintStatus},
    enrollment::{AssignFacultyRequest, Enrollment, EnrollmentStatus},
    grade::Grade,
    hostel::{Hostel, HostelLedger, HostelStatus, OccupancyCorrection, Room, RoomAsset, Warden},
    settings::{Settings, UpdateSettingsRequest},
    student::{GradeSheet, Student},
    willingness::{Willingness, WillingnessStatus},
};
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::conflict_message;
use crate::repositories::{
    allotment::AllotmentRepository, attendance::AttendanceRepository,
    calendar::CalendarRepository, complaint::ComplaintRepository, course::CourseRepository,
    enrollment::{EnrollmentRepository, dedup}, faculty::FacultyRepository,
    grade::GradeRepository, hostel::HostelRepository, settings::SettingsRepository,
    student::StudentRepository, willingness::WillingnessRepository,
};

#[derive(Default)]
struct Tables {
    students: HashMap<Uuid, Student>,
    grade_sheets: HashMap<Uuid, Vec<GradeSheet>>,
    faculty: HashMap<Uuid, Faculty>,
    courses: HashMap<Uuid, Course>,
    offerings: HashMap<Uuid, CourseOffering>,
    enrollments: HashMap<Uuid, Enrollment>,
    attendance: Vec<Attendance>,
    /// Keyed by enrollment id.
    grades: HashMap<Uuid, Grade>,
    hostels: HashMap<Uuid, Hostel>,
    rooms: HashMap<Uuid, Room>,
    /// Keyed by hostel id.
    wardens: HashMap<Uuid, Warden>,
    willingness: HashMap<Uuid, Willingness>,
    allotments: HashMap<Uuid, RoomAllotment>,
    complaints: HashMap<Uuid, Complaint>,
    settings: Option<Settings>,
    calendars: HashMap<(i32, i32), AcademicCalendar>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a room's counter without touching its allotments.
    pub async fn force_room_occupied(&self, room_id: Uuid, occupied: i32) -> CampusResult<()> {
        let mut tables = self.tables.lock().await;
        let room = tables
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| CampusError::not_found("Room", room_id))?;
        room.occupied = occupied;
        Ok(())
    }
}

fn conflict(constraint: &str) -> CampusError {
    CampusError::Conflict(conflict_message(Some(constraint)))
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn create_student(&self, student: Student) -> CampusResult<Student> {
        let mut tables = self.tables.lock().await;
        if tables.students.values().any(|s| s.college_id == student.college_id) {
            return Err(conflict("uq_students_college_id"));
        }
        if tables.students.values().any(|s| s.email == student.email) {
            return Err(conflict("uq_students_email"));
        }
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn get_student(&self, id: Uuid) -> CampusResult<Option<Student>> {
        Ok(self.tables.lock().await.students.get(&id).cloned())
    }

    async fn grade_sheets(&self, student_id: Uuid) -> CampusResult<Vec<GradeSheet>> {
        let tables = self.tables.lock().await;
        let mut sheets = tables.grade_sheets.get(&student_id).cloned().unwrap_or_default();
        sheets.sort_by_key(|s| s.semester);
        Ok(sheets)
    }

    async fn promote_student(&self, student_id: Uuid, sheet: GradeSheet) -> CampusResult<Student> {
        let mut guard = self.tables.lock().await;
        let tables = &mut *guard;

        let student = tables
            .students
            .get_mut(&student_id)
            .ok_or_else(|| CampusError::not_found("Student", student_id))?;

        if student.current_sem != sheet.semester {
            return Err(CampusError::Conflict(format!(
                "Student is in semester {}, not {}",
                student.current_sem, sheet.semester
            )));
        }

        let sheets = tables.grade_sheets.entry(student_id).or_default();
        if sheets.iter().any(|s| s.semester == sheet.semester) {
            return Err(conflict("uq_grade_sheets_student_semester"));
        }

        student.current_sem += 1;
        student.cgpa = sheet.cgpa;
        sheets.push(sheet);

        Ok(student.clone())
    }
}

#[async_trait]
impl FacultyRepository for MemoryStore {
    async fn create_faculty(&self, faculty: Faculty) -> CampusResult<Faculty> {
        let mut tables = self.tables.lock().await;
        if tables.faculty.values().any(|f| f.email == faculty.email) {
            return Err(conflict("uq_faculty_email"));
        }
        if tables.faculty.values().any(|f| f.employee_id == faculty.employee_id) {
            return Err(conflict("uq_faculty_employee_id"));
        }
        tables.faculty.insert(faculty.id, faculty.clone());
        Ok(faculty)
    }

    async fn get_faculty(&self, id: Uuid) -> CampusResult<Option<Faculty>> {
        Ok(self.tables.lock().await.faculty.get(&id).cloned())
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn create_course(&self, course: Course) -> CampusResult<Course> {
        let mut tables = self.tables.lock().await;
        if tables.courses.values().any(|c| c.code == course.code) {
            return Err(conflict("uq_courses_code"));
        }
        tables.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn get_course(&self, id: Uuid) -> CampusResult<Option<Course>> {
        Ok(self.tables.lock().await.courses.get(&id).cloned())
    }

    async fn create_offering(&self, offering: CourseOffering) -> CampusResult<CourseOffering> {
        let mut tables = self.tables.lock().await;
        tables.offerings.insert(offering.id, offering.clone());
        Ok(offering)
    }

    async fn get_offering(&self, id: Uuid) -> CampusResult<Option<CourseOffering>> {
        Ok(self.tables.lock().await.offerings.get(&id).cloned())
    }
}

fn ensure_enrollments_exist(
    enrollments: &HashMap<Uuid, Enrollment>,
    ids: &[Uuid],
) -> CampusResult<()> {
    match ids.iter().find(|id| !enrollments.contains_key(*id)) {
        Some(missing) => Err(CampusError::not_found("Enrollment", missing)),
        None => Ok(()),
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn create_enrollments(&self, enrollments: Vec<Enrollment>) -> CampusResult<Vec<Enrollment>> {
        let mut tables = self.tables.lock().await;

        for (i, enrollment) in enrollments.iter().enumerate() {
            let same_pair = |e: &Enrollment| {
                e.student_id == enrollment.student_id && e.offering_id == enrollment.offering_id
            };
            if tables.enrollments.values().any(same_pair) || enrollments[..i].iter().any(same_pair) {
                return Err(conflict("uq_enrollments_student_offering"));
            }
        }

        for enrollment in &enrollments {
            tables.enrollments.insert(enrollment.id, enrollment.clone());
        }
        Ok(enrollments)
    }

    async fn get_enrollment(&self, id: Uuid) -> CampusResult<Option<Enrollment>> {
        Ok(self.tables.lock().await.enrollments.get(&id).cloned())
    }

    async fn enrollments_for_offering(&self, offering_id: Uuid) -> CampusResult<Vec<Enrollment>> {
        let tables = self.tables.lock().await;
        let mut found: Vec<Enrollment> = tables
            .enrollments
            .values()
            .filter(|e| e.offering_id == offering_id)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.created_at);
        Ok(found)
    }

    async fn enrollments_for_student(&self, student_id: Uuid) -> CampusResult<Vec<Enrollment>> {
        let tables = self.tables.lock().await;
        let mut found: Vec<Enrollment> = tables
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.created_at);
        Ok(found)
    }

    async fn transition_enrollments(
        &self,
        ids: Vec<Uuid>,
        to: EnrollmentStatus,
    ) -> CampusResult<Vec<Enrollment>> {
        let ids = dedup(ids);
        let mut tables = self.tables.lock().await;

        ensure_enrollments_exist(&tables.enrollments, &ids)?;
        for id in &ids {
            if let Some(enrollment) = tables.enrollments.get(id) {
                enrollment.status.transition(to)?;
            }
        }

        let now = Utc::now();
        let mut updated = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(enrollment) = tables.enrollments.get_mut(id) {
                enrollment.status = to;
                enrollment.updated_at = now;
                updated.push(enrollment.clone());
            }
        }
        tracing::info!("Moved {} enrollment(s) to {}", updated.len(), to);
        Ok(updated)
    }

    async fn assign_enrollments(&self, assignment: AssignFacultyRequest) -> CampusResult<Vec<Enrollment>> {
        let ids = dedup(assignment.enrollment_ids);
        let mut tables = self.tables.lock().await;

        ensure_enrollments_exist(&tables.enrollments, &ids)?;
        for id in &ids {
            if let Some(enrollment) = tables.enrollments.get(id) {
                if enrollment.offering_id != assignment.offering_id {
                    return Err(CampusError::Validation(format!(
                        "Enrollment {} does not belong to this offering",
                        enrollment.id
                    )));
                }
                enrollment.status.transition(EnrollmentStatus::Approved)?;
            }
        }

        let now = Utc::now();
        let mut updated = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(enrollment) = tables.enrollments.get_mut(id) {
                enrollment.faculty_id = Some(assignment.faculty_id);
                enrollment.schedule = assignment.schedule.clone();
                enrollment.status = EnrollmentStatus::Approved;
                enrollment.updated_at = now;
                updated.push(enrollment.clone());
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn record_attendance(&self, records: Vec<Attendance>) -> CampusResult<Vec<Attendance>> {
        let mut tables = self.tables.lock().await;
        let mut stored = Vec::with_capacity(records.len());

        for record in records {
            let existing = tables
                .attendance
                .iter_mut()
                .find(|a| a.enrollment_id == record.enrollment_id && a.date == record.date);
            match existing {
                Some(existing) => {
                    existing.status = record.status;
                    stored.push(existing.clone());
                }
                None => {
                    tables.attendance.push(record.clone());
                    stored.push(record);
                }
            }
        }
        Ok(stored)
    }

    async fn attendance_for_enrollment(&self, enrollment_id: Uuid) -> CampusResult<Vec<Attendance>> {
        let tables = self.tables.lock().await;
        let mut found: Vec<Attendance> = tables
            .attendance
            .iter()
            .filter(|a| a.enrollment_id == enrollment_id)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.date);
        Ok(found)
    }
}

#[async_trait]
impl GradeRepository for MemoryStore {
    async fn save_grade(&self, grade: Grade, status: EnrollmentStatus) -> CampusResult<Grade> {
        let mut guard = self.tables.lock().await;
        let tables = &mut *guard;

        let enrollment = tables
            .enrollments
            .get_mut(&grade.enrollment_id)
            .ok_or_else(|| CampusError::not_found("Enrollment", grade.enrollment_id))?;
        enrollment.status = enrollment.status.transition(status)?;
        enrollment.updated_at = Utc::now();

        let stored = match tables.grades.get(&grade.enrollment_id) {
            Some(previous) => Grade {
                id: previous.id,
                created_at: previous.created_at,
                ..grade
            },
            None => grade,
        };
        tables.grades.insert(stored.enrollment_id, stored.clone());
        Ok(stored)
    }

    async fn grade_for_enrollment(&self, enrollment_id: Uuid) -> CampusResult<Option<Grade>> {
        Ok(self.tables.lock().await.grades.get(&enrollment_id).cloned())
    }
}

#[async_trait]
impl HostelRepository for MemoryStore {
    async fn create_hostel(&self, hostel: Hostel) -> CampusResult<Hostel> {
        let mut tables = self.tables.lock().await;
        if tables.hostels.values().any(|h| h.name == hostel.name) {
            return Err(conflict("uq_hostels_name"));
        }
        tables.hostels.insert(hostel.id, hostel.clone());
        Ok(hostel)
    }

    async fn get_hostel(&self, id: Uuid) -> CampusResult<Option<Hostel>> {
        Ok(self.tables.lock().await.hostels.get(&id).cloned())
    }

    async fn hostel_ledger(&self, hostel_id: Uuid) -> CampusResult<HostelLedger> {
        let tables = self.tables.lock().await;
        let mut ledger = HostelLedger {
            total_rooms: 0,
            total_capacity: 0,
            total_occupied: 0,
        };
        for room in tables.rooms.values().filter(|r| r.hostel_id == hostel_id) {
            ledger.total_rooms += 1;
            ledger.total_capacity += i64::from(room.capacity);
            ledger.total_occupied += i64::from(room.occupied);
        }
        Ok(ledger)
    }

    async fn update_hostel_status(&self, id: Uuid, status: HostelStatus) -> CampusResult<Hostel> {
        let mut tables = self.tables.lock().await;
        let hostel = tables
            .hostels
            .get_mut(&id)
            .ok_or_else(|| CampusError::not_found("Hostel", id))?;
        hostel.status = status;
        Ok(hostel.clone())
    }

    async fn create_room(&self, room: Room) -> CampusResult<Room> {
        let mut tables = self.tables.lock().await;
        if tables
            .rooms
            .values()
            .any(|r| r.hostel_id == room.hostel_id && r.formatted_room == room.formatted_room)
        {
            return Err(conflict("uq_rooms_hostel_room"));
        }
        tables.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn get_room(&self, id: Uuid) -> CampusResult<Option<Room>> {
        Ok(self.tables.lock().await.rooms.get(&id).cloned())
    }

    async fn room_occupants(&self, room_id: Uuid) -> CampusResult<Vec<Uuid>> {
        let tables = self.tables.lock().await;
        let mut active: Vec<&RoomAllotment> = tables
            .allotments
            .values()
            .filter(|a| a.room_id == room_id && a.is_active())
            .collect();
        active.sort_by_key(|a| a.allotted_at);
        Ok(active.into_iter().map(|a| a.student_id).collect())
    }

    async fn update_room_assets(&self, id: Uuid, assets: Vec<RoomAsset>) -> CampusResult<Room> {
        let mut tables = self.tables.lock().await;
        let room = tables
            .rooms
            .get_mut(&id)
            .ok_or_else(|| CampusError::not_found("Room", id))?;
        room.assets = assets;
        Ok(room.clone())
    }

    async fn vacant_rooms(&self, hostel_id: Option<Uuid>) -> CampusResult<Vec<PolicyRoom>> {
        let tables = self.tables.lock().await;
        let mut vacant: Vec<(&Hostel, &Room)> = tables
            .rooms
            .values()
            .filter(|r| !r.is_full() && hostel_id.is_none_or(|id| r.hostel_id == id))
            .filter_map(|r| tables.hostels.get(&r.hostel_id).map(|h| (h, r)))
            .filter(|(h, _)| h.status == HostelStatus::Active)
            .collect();
        vacant.sort_by(|(ha, ra), (hb, rb)| {
            ha.name.cmp(&hb.name).then_with(|| ra.formatted_room.cmp(&rb.formatted_room))
        });

        Ok(vacant
            .into_iter()
            .map(|(hostel, room)| PolicyRoom {
                room_id: room.id,
                hostel_id: hostel.id,
                hostel_type: hostel.hostel_type,
                vacancies: room.vacancies(),
            })
            .collect())
    }

    async fn assign_warden(&self, warden: Warden) -> CampusResult<Warden> {
        let mut tables = self.tables.lock().await;
        if tables.wardens.contains_key(&warden.hostel_id) {
            return Err(conflict("uq_wardens_hostel"));
        }
        tables.wardens.insert(warden.hostel_id, warden.clone());
        Ok(warden)
    }

    async fn warden_for_hostel(&self, hostel_id: Uuid) -> CampusResult<Option<Warden>> {
        Ok(self.tables.lock().await.wardens.get(&hostel_id).cloned())
    }
}

#[async_trait]
impl WillingnessRepository for MemoryStore {
    async fn create_willingness(&self, willingness: Willingness) -> CampusResult<Willingness> {
        let mut tables = self.tables.lock().await;
        if tables
            .willingness
            .values()
            .any(|w| w.student_id == willingness.student_id && w.year == willingness.year)
        {
            return Err(conflict("uq_willingness_student_year"));
        }
        tables.willingness.insert(willingness.id, willingness.clone());
        Ok(willingness)
    }

    async fn get_willingness(&self, id: Uuid) -> CampusResult<Option<Willingness>> {
        Ok(self.tables.lock().await.willingness.get(&id).cloned())
    }

    async fn review_willingness(
        &self,
        id: Uuid,
        decision: WillingnessStatus,
        remarks: Option<String>,
    ) -> CampusResult<Willingness> {
        let mut tables = self.tables.lock().await;
        let willingness = tables
            .willingness
            .get_mut(&id)
            .ok_or_else(|| CampusError::not_found("Willingness", id))?;
        willingness.status = willingness.status.review(decision)?;
        willingness.remarks = remarks;
        willingness.updated_at = Utc::now();
        Ok(willingness.clone())
    }

    async fn approved_without_allotment(&self, year: i32) -> CampusResult<Vec<PolicyStudent>> {
        let tables = self.tables.lock().await;
        let mut approved: Vec<&Willingness> = tables
            .willingness
            .values()
            .filter(|w| w.year == year && w.status == WillingnessStatus::Approved)
            .filter(|w| {
                !tables
                    .allotments
                    .values()
                    .any(|a| a.student_id == w.student_id && a.year == year && a.is_active())
            })
            .collect();
        approved.sort_by_key(|w| w.created_at);

        Ok(approved
            .into_iter()
            .filter_map(|w| {
                tables.students.get(&w.student_id).map(|s| PolicyStudent {
                    student_id: s.id,
                    willingness_id: w.id,
                    gender: s.gender,
                })
            })
            .collect())
    }
}

#[async_trait]
impl AllotmentRepository for MemoryStore {
    async fn allot_room(&self, request: AllotRoomRequest) -> CampusResult<RoomAllotment> {
        let mut tables = self.tables.lock().await;

        let room = tables
            .rooms
            .get(&request.room_id)
            .ok_or_else(|| CampusError::not_found("Room", request.room_id))?;
        let hostel = tables
            .hostels
            .get(&room.hostel_id)
            .ok_or_else(|| CampusError::not_found("Hostel", room.hostel_id))?;
        let student = tables
            .students
            .get(&request.student_id)
            .ok_or_else(|| CampusError::not_found("Student", request.student_id))?;
        let willingness = tables
            .willingness
            .values()
            .find(|w| w.student_id == request.student_id && w.year == request.year);
        let has_active_allotment = tables.allotments.values().any(|a| {
            a.student_id == request.student_id && a.year == request.year && a.is_active()
        });

        AllotmentCandidate {
            student,
            hostel,
            room,
            willingness,
            has_active_allotment,
        }
        .check()?;

        let willingness_id = willingness
            .map(|w| w.id)
            .ok_or_else(|| CampusError::Validation("No willingness submitted for this year".to_string()))?;

        let allotment = RoomAllotment {
            id: Uuid::new_v4(),
            student_id: student.id,
            hostel_id: hostel.id,
            room_id: room.id,
            year: request.year,
            willingness_id,
            status: AllotmentStatus::Allotted,
            allotted_at: Utc::now(),
            vacated_at: None,
        };
        tracing::info!(
            "Allotted room {} in {} to student {} for {}",
            room.formatted_room,
            hostel.name,
            student.college_id,
            request.year
        );

        tables.allotments.insert(allotment.id, allotment.clone());
        if let Some(room) = tables.rooms.get_mut(&request.room_id) {
            room.occupied += 1;
        }
        Ok(allotment)
    }

    async fn get_allotment(&self, id: Uuid) -> CampusResult<Option<RoomAllotment>> {
        Ok(self.tables.lock().await.allotments.get(&id).cloned())
    }

    async fn vacate_allotment(&self, id: Uuid) -> CampusResult<RoomAllotment> {
        let mut tables = self.tables.lock().await;

        let allotment = tables
            .allotments
            .get_mut(&id)
            .ok_or_else(|| CampusError::not_found("Allotment", id))?;
        if !allotment.is_active() {
            return Err(CampusError::Conflict("Allotment is already vacated".to_string()));
        }
        allotment.status = AllotmentStatus::Vacated;
        allotment.vacated_at = Some(Utc::now());
        let vacated = allotment.clone();

        if let Some(room) = tables.rooms.get_mut(&vacated.room_id) {
            room.occupied = (room.occupied - 1).max(0);
        }
        tracing::info!("Vacated allotment {} in room {}", id, vacated.room_id);
        Ok(vacated)
    }

    async fn reconcile_occupancy(&self) -> CampusResult<Vec<OccupancyCorrection>> {
        let mut guard = self.tables.lock().await;
        let tables = &mut *guard;

        let mut actual: HashMap<Uuid, i32> = HashMap::new();
        for allotment in tables.allotments.values().filter(|a| a.is_active()) {
            *actual.entry(allotment.room_id).or_default() += 1;
        }

        let mut corrections = Vec::new();
        for room in tables.rooms.values_mut() {
            let count = actual.get(&room.id).copied().unwrap_or(0);
            if room.occupied != count {
                corrections.push(OccupancyCorrection {
                    room_id: room.id,
                    recorded: room.occupied,
                    actual: count,
                });
                room.occupied = count;
            }
        }
        corrections.sort_by_key(|c| c.room_id);

        if !corrections.is_empty() {
            tracing::warn!("Corrected occupancy on {} room(s)", corrections.len());
        }
        Ok(corrections)
    }
}

#[async_trait]
impl ComplaintRepository for MemoryStore {
    async fn create_complaint(&self, complaint: Complaint) -> CampusResult<Complaint> {
        let mut tables = self.tables.lock().await;
        tables.complaints.insert(complaint.id, complaint.clone());
        Ok(complaint)
    }

    async fn get_complaint(&self, id: Uuid) -> CampusResult<Option<Complaint>> {
        Ok(self.tables.lock().await.complaints.get(&id).cloned())
    }

    async fn resolve_complaint(&self, id: Uuid, remarks: Option<String>) -> CampusResult<Complaint> {
        let mut tables = self.tables.lock().await;
        let complaint = tables
            .complaints
            .get_mut(&id)
            .ok_or_else(|| CampusError::not_found("Complaint", id))?;
        if complaint.status != ComplaintStatus::Pending {
            return Err(CampusError::Conflict("Complaint is already resolved".to_string()));
        }
        complaint.status = ComplaintStatus::Resolved;
        complaint.remarks = remarks;
        complaint.resolved_at = Some(Utc::now());
        Ok(complaint.clone())
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn load_settings(&self) -> CampusResult<Settings> {
        Ok(self.tables.lock().await.settings.clone().unwrap_or_default())
    }

    async fn update_settings(&self, patch: UpdateSettingsRequest) -> CampusResult<Settings> {
        let mut tables = self.tables.lock().await;
        let settings = tables.settings.take().unwrap_or_default().apply(patch);
        tables.settings = Some(settings.clone());
        Ok(settings)
    }
}

#[async_trait]
impl CalendarRepository for MemoryStore {
    async fn upsert_calendar(&self, calendar: AcademicCalendar) -> CampusResult<AcademicCalendar> {
        let mut tables = self.tables.lock().await;
        let key = (calendar.year, calendar.semester);
        let stored = match tables.calendars.get(&key) {
            Some(previous) => AcademicCalendar {
                id: previous.id,
                ..calendar
            },
            None => calendar,
        };
        tables.calendars.insert(key, stored.clone());
        Ok(stored)
    }

    async fn get_calendar(&self, year: i32, semester: i32) -> CampusResult<Option<AcademicCalendar>> {
        Ok(self.tables.lock().await.calendars.get(&(year, semester)).cloned())
    }
}
