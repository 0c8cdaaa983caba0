use axum::http::StatusCode;
use campus_core::errors::CampusError;
use campus_core::models::allotment::{PolicyAssignment, PolicyResponse};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{MockAllotmentPolicy, TestContext, YEAR, id_at};

#[test_log::test(tokio::test)]
async fn approved_willingness_leads_to_allotment() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Male").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(hostel_id, "A-101", 2).await;
    let willingness_id = ctx.approved_willingness(student_id).await;

    let response = ctx
        .server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": room_id, "year": YEAR }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["allotment"]["status"], json!("Allotted"));
    assert_eq!(body["allotment"]["hostelId"], json!(hostel_id));
    assert_eq!(body["allotment"]["willingnessId"], json!(willingness_id));
    assert_eq!(ctx.room_occupied(room_id).await, 1);

    let room = ctx
        .server
        .get(&format!("/room/{}", room_id))
        .await
        .json::<Value>();
    assert_eq!(room["room"]["students"], json!([student_id]));

    let hostel = ctx
        .server
        .get(&format!("/hostel/{}", hostel_id))
        .await
        .json::<Value>();
    assert_eq!(hostel["hostel"]["totalOccupied"], json!(1));
    assert_eq!(hostel["hostel"]["totalCapacity"], json!(2));
}

#[tokio::test]
async fn second_allotment_in_the_same_year_is_rejected() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Male").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let first = ctx.create_room(hostel_id, "A-101", 2).await;
    let second = ctx.create_room(hostel_id, "A-102", 2).await;
    ctx.approved_willingness(student_id).await;

    ctx.server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": first, "year": YEAR }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": second, "year": YEAR }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "message": "Student already allotted a room for this year"
        })
    );
    assert_eq!(ctx.room_occupied(second).await, 0);
}

#[tokio::test]
async fn duplicate_willingness_is_a_conflict() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Female").await;
    ctx.approved_willingness(student_id).await;

    let response = ctx
        .server
        .post("/willingness")
        .json(&json!({ "studentId": student_id, "year": YEAR }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Willingness already submitted for this year")
    );
}

#[tokio::test]
async fn reviewed_willingness_cannot_be_reviewed_again() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Female").await;
    let id = ctx.approved_willingness(student_id).await;

    ctx.server
        .put(&format!("/willingness/{}/review", id))
        .json(&json!({ "status": "Rejected", "remarks": "changed our mind" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn allotment_requires_an_approved_willingness() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Male").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(hostel_id, "A-101", 1).await;

    let response = ctx
        .server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": room_id, "year": YEAR }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("No willingness submitted for this year")
    );
}

#[tokio::test]
async fn hostel_type_must_admit_the_student() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Female").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(hostel_id, "B-201", 2).await;
    ctx.approved_willingness(student_id).await;

    ctx.server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": room_id, "year": YEAR }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.room_occupied(room_id).await, 0);
}

#[tokio::test]
async fn full_room_rejects_further_allotments() {
    let ctx = TestContext::new();
    let hostel_id = ctx.create_hostel("mixed").await;
    let room_id = ctx.create_room(hostel_id, "S-1", 1).await;

    let first = ctx.create_student("Male").await;
    let second = ctx.create_student("Female").await;
    ctx.approved_willingness(first).await;
    ctx.approved_willingness(second).await;

    ctx.server
        .post("/roomallotment")
        .json(&json!({ "studentId": first, "roomId": room_id, "year": YEAR }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/roomallotment")
        .json(&json!({ "studentId": second, "roomId": room_id, "year": YEAR }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["message"], json!("Room is full"));
    assert_eq!(ctx.room_occupied(room_id).await, 1);
}

#[tokio::test]
async fn vacating_frees_the_bed_once() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Male").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(hostel_id, "A-101", 2).await;
    ctx.approved_willingness(student_id).await;

    let response = ctx
        .server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": room_id, "year": YEAR }))
        .await;
    let allotment_id = id_at(&response.json::<Value>(), "allotment");

    let response = ctx
        .server
        .put(&format!("/roomallotment/{}/vacate", allotment_id))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["allotment"]["status"], json!("Vacated"));
    assert_eq!(ctx.room_occupied(room_id).await, 0);

    ctx.server
        .put(&format!("/roomallotment/{}/vacate", allotment_id))
        .await
        .assert_status(StatusCode::CONFLICT);
    assert_eq!(ctx.room_occupied(room_id).await, 0);
}

#[tokio::test]
async fn auto_allocate_applies_policy_proposals() {
    let mut policy = MockAllotmentPolicy::new();
    // Puts every waiting student into the first vacant room.
    policy.expect_allocate().times(1).returning(|request| {
        let room = request.rooms[0].room_id;
        Ok(PolicyResponse {
            assignments: request
                .students
                .iter()
                .map(|student| PolicyAssignment {
                    student_id: student.student_id,
                    room_id: room,
                })
                .collect(),
        })
    });

    let ctx = TestContext::with_policy(policy);
    let hostel_id = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(hostel_id, "A-101", 3).await;
    let mut students = Vec::new();
    for gender in ["Male", "Female"] {
        let id = ctx.create_student(gender).await;
        ctx.approved_willingness(id).await;
        students.push(id);
    }

    let response = ctx
        .server
        .post("/roomallotment/auto")
        .json(&json!({ "year": YEAR, "hostelId": hostel_id }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let allotted = body["allotted"].as_array().unwrap();
    let rejected = body["rejected"].as_array().unwrap();
    assert_eq!(allotted.len(), 1);
    assert_eq!(allotted[0]["studentId"], json!(students[0]));
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["studentId"], json!(students[1]));
    assert_eq!(
        rejected[0]["reason"],
        json!("A boys hostel cannot house a Female student")
    );
    assert_eq!(ctx.room_occupied(room_id).await, 1);
}

#[tokio::test]
async fn auto_allocate_without_candidates_skips_the_policy() {
    let mut policy = MockAllotmentPolicy::new();
    policy.expect_allocate().times(0);

    let ctx = TestContext::with_policy(policy);
    let hostel_id = ctx.create_hostel("girls").await;
    ctx.create_room(hostel_id, "G-1", 2).await;

    let response = ctx
        .server
        .post("/roomallotment/auto")
        .json(&json!({ "year": YEAR }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["allotted"], json!([]));
}

#[tokio::test]
async fn unavailable_policy_service_is_reported() {
    let mut policy = MockAllotmentPolicy::new();
    policy.expect_allocate().returning(|_| {
        Err(CampusError::Unavailable(
            "Allotment policy service is not configured".to_string(),
        ))
    });

    let ctx = TestContext::with_policy(policy);
    let student_id = ctx.create_student("Female").await;
    ctx.approved_willingness(student_id).await;
    let hostel_id = ctx.create_hostel("girls").await;
    ctx.create_room(hostel_id, "G-1", 2).await;

    ctx.server
        .post("/roomallotment/auto")
        .json(&json!({ "year": YEAR }))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn reconcile_repairs_drifted_counters() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Male").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(hostel_id, "A-101", 4).await;
    ctx.approved_willingness(student_id).await;
    ctx.server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": room_id, "year": YEAR }))
        .await
        .assert_status(StatusCode::CREATED);

    ctx.store.force_room_occupied(room_id, 3).await.unwrap();

    let response = ctx.server.post("/admin/reconcile-occupancy").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["corrections"],
        json!([{ "roomId": room_id, "recorded": 3, "actual": 1 }])
    );
    assert_eq!(ctx.room_occupied(room_id).await, 1);

    let again = ctx.server.post("/admin/reconcile-occupancy").await;
    assert_eq!(again.json::<Value>()["corrections"], json!([]));
}
