use campus_core::errors::CampusError;
use campus_core::models::allotment::AllotmentCandidate;
use campus_core::models::hostel::{Hostel, HostelStatus, HostelType, Room};
use campus_core::models::student::{Gender, Student};
use campus_core::models::willingness::{Willingness, WillingnessStatus};
use chrono::Utc;
use rstest::rstest;
use uuid::Uuid;

fn student(gender: Gender) -> Student {
    Student {
        id: Uuid::new_v4(),
        name: "Asha".to_string(),
        college_id: "2023CS001".to_string(),
        email: "asha@example.edu".to_string(),
        password_hash: String::new(),
        gender,
        department: "CSE".to_string(),
        programme: "BTech".to_string(),
        batch: 2023,
        current_sem: 3,
        cgpa: 0.0,
        created_at: Utc::now(),
    }
}

fn hostel(hostel_type: HostelType, status: HostelStatus) -> Hostel {
    Hostel {
        id: Uuid::new_v4(),
        name: "Aravali".to_string(),
        hostel_type,
        status,
        created_at: Utc::now(),
    }
}

fn room(hostel: &Hostel, capacity: i32, occupied: i32) -> Room {
    Room {
        id: Uuid::new_v4(),
        hostel_id: hostel.id,
        formatted_room: "A-101".to_string(),
        capacity,
        occupied,
        assets: vec![],
        created_at: Utc::now(),
    }
}

fn willingness(student: &Student, status: WillingnessStatus) -> Willingness {
    let mut w = Willingness::submitted(student.id, 2025);
    w.status = status;
    w
}

#[test]
fn test_eligible_candidate_passes() {
    let s = student(Gender::Male);
    let h = hostel(HostelType::Boys, HostelStatus::Active);
    let r = room(&h, 2, 0);
    let w = willingness(&s, WillingnessStatus::Approved);
    let candidate = AllotmentCandidate {
        student: &s,
        hostel: &h,
        room: &r,
        willingness: Some(&w),
        has_active_allotment: false,
    };
    assert!(candidate.check().is_ok());
}

#[rstest]
#[case(HostelType::Boys, Gender::Female, false)]
#[case(HostelType::Girls, Gender::Male, false)]
#[case(HostelType::Girls, Gender::Female, true)]
#[case(HostelType::Mixed, Gender::Other, true)]
fn test_gender_compatibility(
    #[case] hostel_type: HostelType,
    #[case] gender: Gender,
    #[case] allowed: bool,
) {
    assert_eq!(hostel_type.admits(gender), allowed);
}

#[test]
fn test_full_room_is_conflict() {
    let s = student(Gender::Female);
    let h = hostel(HostelType::Girls, HostelStatus::Active);
    let r = room(&h, 1, 1);
    let w = willingness(&s, WillingnessStatus::Approved);
    let candidate = AllotmentCandidate {
        student: &s,
        hostel: &h,
        room: &r,
        willingness: Some(&w),
        has_active_allotment: false,
    };
    match candidate.check() {
        Err(CampusError::Conflict(msg)) => assert_eq!(msg, "Room is full"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_already_allotted_is_conflict() {
    let s = student(Gender::Male);
    let h = hostel(HostelType::Mixed, HostelStatus::Active);
    let r = room(&h, 2, 0);
    let w = willingness(&s, WillingnessStatus::Approved);
    let candidate = AllotmentCandidate {
        student: &s,
        hostel: &h,
        room: &r,
        willingness: Some(&w),
        has_active_allotment: true,
    };
    match candidate.check() {
        Err(CampusError::Conflict(msg)) => assert!(msg.contains("already allotted")),
        other => panic!("unexpected {:?}", other),
    }
}

#[rstest]
#[case(None)]
#[case(Some(WillingnessStatus::Submitted))]
#[case(Some(WillingnessStatus::Rejected))]
fn test_unapproved_willingness_rejected(#[case] status: Option<WillingnessStatus>) {
    let s = student(Gender::Male);
    let h = hostel(HostelType::Boys, HostelStatus::Active);
    let r = room(&h, 2, 0);
    let w = status.map(|st| willingness(&s, st));
    let candidate = AllotmentCandidate {
        student: &s,
        hostel: &h,
        room: &r,
        willingness: w.as_ref(),
        has_active_allotment: false,
    };
    assert!(matches!(candidate.check(), Err(CampusError::Validation(_))));
}

#[test]
fn test_inactive_hostel_rejected() {
    let s = student(Gender::Male);
    let h = hostel(HostelType::Boys, HostelStatus::Maintenance);
    let r = room(&h, 2, 0);
    let w = willingness(&s, WillingnessStatus::Approved);
    let candidate = AllotmentCandidate {
        student: &s,
        hostel: &h,
        room: &r,
        willingness: Some(&w),
        has_active_allotment: false,
    };
    assert!(matches!(candidate.check(), Err(CampusError::Validation(_))));
}

#[test]
fn test_willingness_review_only_once() {
    let approved = WillingnessStatus::Submitted
        .review(WillingnessStatus::Approved)
        .unwrap();
    assert_eq!(approved, WillingnessStatus::Approved);
    assert!(matches!(
        approved.review(WillingnessStatus::Rejected),
        Err(CampusError::InvalidTransition { .. })
    ));
    assert!(matches!(
        WillingnessStatus::Submitted.review(WillingnessStatus::Submitted),
        Err(CampusError::Validation(_))
    ));
}
