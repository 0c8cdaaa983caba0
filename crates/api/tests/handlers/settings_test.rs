use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn settings_start_closed() {
    let ctx = TestContext::new();
    let body = ctx.server.get("/settings").await.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["settings"]["isRegistrationOpen"], json!(false));
    assert_eq!(body["settings"]["areGradeSheetsVisible"], json!(false));
    assert_eq!(body["settings"]["maintenanceMode"], json!(false));
}

#[tokio::test]
async fn partial_update_keeps_other_flags() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "isRegistrationOpen": true, "announcement": "Odd semester" }))
        .await;
    ctx.update_settings(json!({ "areGradeSheetsVisible": true })).await;

    let body = ctx.server.get("/settings").await.json::<Value>();
    assert_eq!(body["settings"]["isRegistrationOpen"], json!(true));
    assert_eq!(body["settings"]["areGradeSheetsVisible"], json!(true));
    assert_eq!(body["settings"]["announcement"], json!("Odd semester"));
}

#[test_log::test(tokio::test)]
async fn maintenance_mode_blocks_writes_but_not_reads() {
    let ctx = TestContext::new();
    let hostel_id = ctx.create_hostel("boys").await;
    ctx.update_settings(json!({ "maintenanceMode": true })).await;

    let response = ctx
        .server
        .post("/hostel")
        .json(&json!({ "name": "Annexe", "hostelType": "mixed" }))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "message": "System is under maintenance, please try again later"
        })
    );

    ctx.server
        .get(&format!("/hostel/{}", hostel_id))
        .await
        .assert_status_ok();
    ctx.server.get("/health").await.assert_status_ok();

    // Settings stay writable so maintenance can be switched off.
    ctx.update_settings(json!({ "maintenanceMode": false })).await;
    ctx.server
        .post("/hostel")
        .json(&json!({ "name": "Annexe", "hostelType": "mixed" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn admin_routes_bypass_maintenance() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "maintenanceMode": true })).await;

    ctx.server
        .post("/admin/reconcile-occupancy")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn health_reports_ok() {
    let ctx = TestContext::new();
    let body = ctx.server.get("/health").await.json::<Value>();
    assert_eq!(body, json!({ "success": true, "status": "ok" }));
}
