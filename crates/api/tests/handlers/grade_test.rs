use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

fn marks(enrollment_id: uuid::Uuid, score: f64) -> Value {
    json!({
        "enrollmentId": enrollment_id,
        "assignments": score,
        "midsem": score,
        "endsem": score,
        "quiz": score,
        "project": score
    })
}

#[test_log::test(tokio::test)]
async fn passing_grade_completes_the_enrollment() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;

    let response = ctx
        .server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 82.0))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["grade"]["total"], json!(82.0));
    assert_eq!(body["grade"]["letterGrade"], json!("A"));
    assert_eq!(body["grade"]["gradePoints"], json!(9));
    assert_eq!(body["enrollmentStatus"], json!("completed"));

    let stored = ctx
        .server
        .get(&format!("/grade/enrollment/{}", approved.enrollment_id))
        .await
        .json::<Value>();
    assert_eq!(stored["grade"]["letterGrade"], json!("A"));
}

#[tokio::test]
async fn failing_grade_moves_to_supplementary_and_can_be_regraded() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Lab").await;

    let response = ctx
        .server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 30.0))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["grade"]["letterGrade"], json!("F"));
    assert_eq!(body["enrollmentStatus"], json!("Supplementary"));

    let response = ctx
        .server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 55.0))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["grade"]["letterGrade"], json!("C+"));
    assert_eq!(body["enrollmentStatus"], json!("completed"));
}

#[tokio::test]
async fn out_of_range_marks_are_rejected() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;

    ctx.server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 120.0))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn selected_enrollment_cannot_be_graded() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "isRegistrationOpen": true })).await;
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 3).await;
    let offering_id = ctx.create_offering(course_id, &[faculty_id]).await;
    let student_id = ctx.create_student("Female").await;
    let enrollment_id = ctx.enroll(student_id, &[offering_id]).await[0];

    ctx.server
        .post("/grade")
        .json(&marks(enrollment_id, 70.0))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn promotion_needs_every_course_graded() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;

    let response = ctx
        .server
        .post(&format!("/student/{}/promote", approved.student_id))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!(format!(
            "Enrollment {} in semester 1 has not been graded yet",
            approved.enrollment_id
        ))
    );
}

#[tokio::test]
async fn promotion_writes_a_grade_sheet_visible_once_published() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;
    ctx.server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 91.0))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .post(&format!("/student/{}/promote", approved.student_id))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["student"]["currentSem"], json!(2));
    assert_eq!(body["student"]["cgpa"], json!(10.0));
    assert_eq!(body["gradeSheet"]["sgpa"], json!(10.0));
    assert_eq!(body["gradeSheet"]["creditsEarned"], json!(4));
    assert_eq!(body["gradeSheet"]["backlogs"], json!([]));

    let path = format!("/student/{}/gradesheets", approved.student_id);
    let hidden = ctx.server.get(&path).await;
    hidden.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        hidden.json::<Value>()["message"],
        json!("Grade sheets have not been published yet")
    );

    ctx.update_settings(json!({ "areGradeSheetsVisible": true })).await;
    let visible = ctx.server.get(&path).await;
    visible.assert_status_ok();
    let sheets = visible.json::<Value>();
    assert_eq!(sheets["gradeSheets"].as_array().unwrap().len(), 1);
    assert_eq!(sheets["gradeSheets"][0]["semester"], json!(1));
}

#[tokio::test]
async fn status_endpoint_cannot_complete_an_ungraded_enrollment() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;

    for (status, message) in [
        ("completed", "Status completed is recorded by submitting a grade"),
        ("Supplementary", "Status Supplementary is recorded by submitting a grade"),
    ] {
        let response = ctx
            .server
            .put("/enrollment/status")
            .json(&json!({ "enrollmentIds": [approved.enrollment_id], "status": status }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], json!(message));
    }

    // A failing student can still be graded and promoted with a backlog.
    let response = ctx
        .server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 10.0))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["enrollmentStatus"], json!("Supplementary"));

    let response = ctx
        .server
        .post(&format!("/student/{}/promote", approved.student_id))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["student"]["currentSem"], json!(2));
    assert_eq!(body["gradeSheet"]["backlogs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn completed_enrollment_can_be_regraded_but_not_failed() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;
    ctx.server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 62.0))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 88.0))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["grade"]["letterGrade"], json!("A"));
    assert_eq!(body["enrollmentStatus"], json!("completed"));

    let response = ctx
        .server
        .post("/grade")
        .json(&marks(approved.enrollment_id, 20.0))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Invalid status transition from completed to Supplementary")
    );

    let stored = ctx
        .server
        .get(&format!("/grade/enrollment/{}", approved.enrollment_id))
        .await
        .json::<Value>();
    assert_eq!(stored["grade"]["letterGrade"], json!("A"));
}
