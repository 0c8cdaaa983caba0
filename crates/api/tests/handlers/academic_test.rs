use axum::http::StatusCode;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, YEAR};

fn offering(course_id: Uuid, coordinator_id: Uuid, instructor_ids: &[Uuid]) -> Value {
    json!({
        "courseId": course_id,
        "semester": 1,
        "year": YEAR,
        "coordinatorId": coordinator_id,
        "instructorIds": instructor_ids
    })
}

#[tokio::test]
async fn offering_with_unknown_instructor_is_not_found() {
    let ctx = TestContext::new();
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 4).await;
    let stranger = Uuid::new_v4();

    let response = ctx
        .server
        .post("/courseOffering")
        .json(&offering(course_id, faculty_id, &[faculty_id, stranger]))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        json!(format!("Faculty with ID {} not found", stranger))
    );
}

#[tokio::test]
async fn offering_with_unknown_coordinator_is_not_found() {
    let ctx = TestContext::new();
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Lab", 2).await;
    let stranger = Uuid::new_v4();

    let response = ctx
        .server
        .post("/courseOffering")
        .json(&offering(course_id, stranger, &[faculty_id]))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        json!(format!("Faculty with ID {} not found", stranger))
    );
}

#[tokio::test]
async fn repeated_instructors_are_stored_once() {
    let ctx = TestContext::new();
    let first = ctx.create_faculty().await;
    let second = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 3).await;

    let response = ctx
        .server
        .post("/courseOffering")
        .json(&offering(course_id, first, &[first, second, first, second]))
        .await;
    response.assert_status(StatusCode::CREATED);
    let offering_id = response.json::<Value>()["offering"]["id"].clone();

    let body = ctx
        .server
        .get(&format!("/courseOffering/{}", offering_id.as_str().unwrap()))
        .await
        .json::<Value>();
    assert_eq!(body["offering"]["instructorIds"], json!([first, second]));
}

#[tokio::test]
async fn calendar_window_must_not_end_before_it_starts() {
    let ctx = TestContext::new();
    let day = |d: u32| NaiveDate::from_ymd_opt(YEAR, 7, d).unwrap();

    let response = ctx
        .server
        .put("/academiccalendar")
        .json(&json!({
            "year": YEAR,
            "semester": 1,
            "registration": { "start": day(20), "end": day(10) },
            "classes": { "start": day(21), "end": day(30) },
            "exams": { "start": day(30), "end": day(31) }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("registration window ends before it starts")
    );

    ctx.server
        .get(&format!("/academiccalendar/{}/1", YEAR))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
