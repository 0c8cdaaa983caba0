use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, id_at};

#[tokio::test]
async fn hostel_ledger_sums_its_rooms() {
    let ctx = TestContext::new();
    let hostel_id = ctx.create_hostel("girls").await;
    ctx.create_room(hostel_id, "G-101", 2).await;
    ctx.create_room(hostel_id, "G-102", 3).await;

    let body = ctx
        .server
        .get(&format!("/hostel/{}", hostel_id))
        .await
        .json::<Value>();
    assert_eq!(body["hostel"]["hostelType"], json!("girls"));
    assert_eq!(body["hostel"]["totalRooms"], json!(2));
    assert_eq!(body["hostel"]["totalCapacity"], json!(5));
    assert_eq!(body["hostel"]["totalOccupied"], json!(0));
}

#[tokio::test]
async fn room_names_are_unique_per_hostel() {
    let ctx = TestContext::new();
    let hostel_id = ctx.create_hostel("boys").await;
    ctx.create_room(hostel_id, "A-101", 2).await;

    ctx.server
        .post("/room")
        .json(&json!({ "hostelId": hostel_id, "formattedRoom": "A-101", "capacity": 2 }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn room_in_unknown_hostel_is_not_found() {
    let ctx = TestContext::new();
    ctx.server
        .post("/room")
        .json(&json!({ "hostelId": Uuid::new_v4(), "formattedRoom": "X-1", "capacity": 1 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn closed_hostel_offers_no_vacancies() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Male").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(hostel_id, "A-101", 2).await;
    ctx.approved_willingness(student_id).await;

    let response = ctx
        .server
        .put(&format!("/hostel/{}/status", hostel_id))
        .json(&json!({ "status": "maintenance" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["hostel"]["status"], json!("maintenance"));

    ctx.server
        .post("/roomallotment")
        .json(&json!({ "studentId": student_id, "roomId": room_id, "year": crate::test_utils::YEAR }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn room_assets_are_replaced() {
    let ctx = TestContext::new();
    let hostel_id = ctx.create_hostel("mixed").await;
    let room_id = ctx.create_room(hostel_id, "M-1", 1).await;

    let response = ctx
        .server
        .put(&format!("/room/{}/assets", room_id))
        .json(&json!({
            "assets": [
                { "assetType": "bed", "count": 1, "condition": "good" },
                { "assetType": "fan", "count": 1, "condition": "damaged" }
            ]
        }))
        .await;
    response.assert_status_ok();
    let assets = &response.json::<Value>()["room"]["assets"];
    assert_eq!(assets.as_array().unwrap().len(), 2);
    assert_eq!(assets[1]["condition"], json!("damaged"));
}

#[tokio::test]
async fn each_hostel_has_one_warden() {
    let ctx = TestContext::new();
    let hostel_id = ctx.create_hostel("boys").await;
    let first = ctx.create_faculty().await;
    let second = ctx.create_faculty().await;

    ctx.server
        .post("/warden")
        .json(&json!({ "facultyId": first, "hostelId": hostel_id }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/warden")
        .json(&json!({ "facultyId": second, "hostelId": hostel_id }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("This hostel already has a warden")
    );

    let warden = ctx
        .server
        .get(&format!("/warden/hostel/{}", hostel_id))
        .await
        .json::<Value>();
    assert_eq!(warden["warden"]["facultyId"], json!(first));
}

#[tokio::test]
async fn complaints_resolve_once() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Female").await;
    let hostel_id = ctx.create_hostel("girls").await;
    let room_id = ctx.create_room(hostel_id, "G-7", 2).await;

    let response = ctx
        .server
        .post("/complaint")
        .json(&json!({
            "studentId": student_id,
            "hostelId": hostel_id,
            "roomId": room_id,
            "category": "Plumbing",
            "description": "Tap leaking since Monday"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let complaint_id = id_at(&response.json::<Value>(), "complaint");

    let path = format!("/complaint/{}/resolve", complaint_id);
    let resolved = ctx
        .server
        .put(&path)
        .json(&json!({ "remarks": "Washer replaced" }))
        .await;
    resolved.assert_status_ok();
    let body = resolved.json::<Value>();
    assert_eq!(body["complaint"]["status"], json!("Resolved"));
    assert!(!body["complaint"]["resolvedAt"].is_null());

    let again = ctx.server.put(&path).json(&json!({})).await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        again.json::<Value>()["message"],
        json!("Complaint is already resolved")
    );
}

#[tokio::test]
async fn complaint_room_must_be_in_the_hostel() {
    let ctx = TestContext::new();
    let student_id = ctx.create_student("Male").await;
    let hostel_id = ctx.create_hostel("boys").await;
    let other_hostel = ctx.create_hostel("boys").await;
    let room_id = ctx.create_room(other_hostel, "Z-1", 1).await;

    ctx.server
        .post("/complaint")
        .json(&json!({
            "studentId": student_id,
            "hostelId": hostel_id,
            "roomId": room_id,
            "category": "Electrical",
            "description": "No power"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
