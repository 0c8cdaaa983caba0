use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_api::middleware::{auth, error_handling::AppError};
use campus_core::errors::CampusError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case(CampusError::NotFound("Student missing".into()), StatusCode::NOT_FOUND)]
#[case(CampusError::Validation("bad input".into()), StatusCode::BAD_REQUEST)]
#[case(CampusError::Conflict("duplicate".into()), StatusCode::CONFLICT)]
#[case(
    CampusError::InvalidTransition { from: "dropped".into(), to: "approved".into() },
    StatusCode::CONFLICT
)]
#[case(CampusError::FeatureDisabled("closed".into()), StatusCode::FORBIDDEN)]
#[case(CampusError::Unavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE)]
#[case(CampusError::Upstream("bad gateway".into()), StatusCode::BAD_GATEWAY)]
#[case(CampusError::Database(eyre::eyre!("pool timed out")), StatusCode::INTERNAL_SERVER_ERROR)]
fn errors_map_to_status_codes(#[case] error: CampusError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn error_body_uses_the_failure_envelope() {
    let response = AppError(CampusError::Conflict(
        "Student already allotted a room for this year".into(),
    ))
    .into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Student already allotted a room for this year"
        })
    );
}

#[tokio::test]
async fn database_errors_do_not_leak_details() {
    let response =
        AppError(CampusError::Database(eyre::eyre!("relation \"rooms\" does not exist")))
            .into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(!body["message"].as_str().unwrap().contains("rooms"));
}

#[test]
fn password_hash_verifies() {
    let hash = auth::hash_password("correct horse battery").unwrap();
    let parsed = PasswordHash::new(&hash).unwrap();
    assert!(
        Argon2::default()
            .verify_password(b"correct horse battery", &parsed)
            .is_ok()
    );
}
