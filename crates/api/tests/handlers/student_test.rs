use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

fn student(college_id: &str, email: &str) -> Value {
    json!({
        "name": "Asha Verma",
        "collegeId": college_id,
        "email": email,
        "password": "s3cret-passphrase",
        "gender": "Female",
        "department": "ECE",
        "programme": "BTech",
        "batch": 2024
    })
}

#[test_log::test(tokio::test)]
async fn registered_student_starts_in_first_semester() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/student")
        .json(&student("EC24001", " Asha.Verma@Campus.test "))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("Student registered"));
    assert_eq!(body["student"]["email"], json!("asha.verma@campus.test"));
    assert_eq!(body["student"]["currentSem"], json!(1));
    assert_eq!(body["student"]["cgpa"], json!(0.0));
}

#[rstest]
#[case::college_id(
    student("EC24002", "other@campus.test"),
    "A student with this collegeId already exists"
)]
#[case::email_in_another_case(
    student("EC24999", "FIRST@campus.test"),
    "A student with this email already exists"
)]
#[tokio::test]
async fn duplicate_identity_is_a_conflict(#[case] second: Value, #[case] message: &str) {
    let ctx = TestContext::new();
    ctx.server
        .post("/student")
        .json(&student("EC24002", "first@campus.test"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx.server.post("/student").json(&second).await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["message"], json!(message));
}

#[rstest]
#[case("not-an-email")]
#[case("@campus.test")]
#[case("asha@localhost")]
#[case("asha@.campus")]
#[tokio::test]
async fn malformed_email_is_rejected(#[case] email: &str) {
    let ctx = TestContext::new();

    let response = ctx.server.post("/student").json(&student("EC24003", email)).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("A valid email is required")
    );
}
