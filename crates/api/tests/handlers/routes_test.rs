use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

// A route that is not mounted answers 404 with an empty body, so the
// envelope tells a missing record apart from a missing route.
#[rstest]
#[case("/student")]
#[case("/faculty")]
#[case("/course")]
#[case("/courseOffering")]
#[case("/enrollment")]
#[case("/attendance/enrollment")]
#[case("/grade/enrollment")]
#[case("/hostel")]
#[case("/room")]
#[case("/warden/hostel")]
#[case("/complaint")]
#[case("/willingness")]
#[case("/roomallotment")]
#[tokio::test]
async fn every_area_answers_with_the_envelope(#[case] prefix: &str) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("{}/{}", prefix, Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn calendar_admin_and_version_are_mounted() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/academiccalendar/2025/2").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("No academic calendar for 2025 semester 2")
    );

    let response = ctx.server.post("/admin/reconcile-occupancy").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["corrections"], json!([]));

    let response = ctx.server.get("/version").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["version"],
        json!(env!("CARGO_PKG_VERSION"))
    );
}
