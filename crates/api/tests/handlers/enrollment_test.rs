use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, YEAR, id_at};

#[test_log::test(tokio::test)]
async fn registration_is_gated_by_settings() {
    let ctx = TestContext::new();
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 4).await;
    let offering_id = ctx.create_offering(course_id, &[faculty_id]).await;
    let student_id = ctx.create_student("Male").await;

    let response = ctx
        .server
        .post("/enrollment")
        .json(&json!({ "studentId": student_id, "offeringIds": [offering_id] }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Course registration is closed")
    );

    ctx.update_settings(json!({ "isRegistrationOpen": true })).await;
    let enrollments = ctx.enroll(student_id, &[offering_id]).await;
    assert_eq!(enrollments.len(), 1);

    let body = ctx
        .server
        .get(&format!("/enrollment/{}", enrollments[0]))
        .await
        .json::<Value>();
    assert_eq!(body["enrollment"]["status"], json!("selected"));
}

#[tokio::test]
async fn registration_outside_the_calendar_window_is_refused() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "isRegistrationOpen": true })).await;
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 3).await;
    let offering_id = ctx.create_offering(course_id, &[faculty_id]).await;
    let student_id = ctx.create_student("Female").await;

    let past = Utc::now().date_naive() - Duration::days(60);
    ctx.server
        .put("/academiccalendar")
        .json(&json!({
            "year": YEAR,
            "semester": 1,
            "registration": { "start": past, "end": past + Duration::days(7) },
            "classes": { "start": past + Duration::days(8), "end": past + Duration::days(120) },
            "exams": { "start": past + Duration::days(121), "end": past + Duration::days(130) }
        }))
        .await
        .assert_status_ok();

    ctx.server
        .post("/enrollment")
        .json(&json!({ "studentId": student_id, "offeringIds": [offering_id] }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_selection_is_a_conflict() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "isRegistrationOpen": true })).await;
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Lab", 2).await;
    let offering_id = ctx.create_offering(course_id, &[faculty_id]).await;
    let student_id = ctx.create_student("Male").await;
    ctx.enroll(student_id, &[offering_id]).await;

    let response = ctx
        .server
        .post("/enrollment")
        .json(&json!({ "studentId": student_id, "offeringIds": [offering_id] }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Student is already enrolled in this offering")
    );
}

#[tokio::test]
async fn assigning_a_foreign_faculty_is_rejected() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "isRegistrationOpen": true })).await;
    let f1 = ctx.create_faculty().await;
    let f2 = ctx.create_faculty().await;
    let f3 = ctx.create_faculty().await;
    let f4 = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 4).await;

    let response = ctx
        .server
        .post("/courseOffering")
        .json(&json!({
            "courseId": course_id,
            "semester": 1,
            "year": YEAR,
            "coordinatorId": f3,
            "instructorIds": [f1, f2]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let offering_id = id_at(&response.json::<Value>(), "offering");
    let student_id = ctx.create_student("Male").await;
    let enrollment_ids = ctx.enroll(student_id, &[offering_id]).await;

    let response = ctx
        .server
        .put("/enrollment/assign")
        .json(&json!({
            "offeringId": offering_id,
            "enrollmentIds": enrollment_ids,
            "facultyId": f4
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "message": "Selected faculty does not belong to this offering."
        })
    );

    let body = ctx
        .server
        .get(&format!("/enrollment/{}", enrollment_ids[0]))
        .await
        .json::<Value>();
    assert_eq!(body["enrollment"]["status"], json!("selected"));
    assert_eq!(body["enrollment"]["facultyId"], json!(null));
}

#[tokio::test]
async fn assignment_approves_with_schedule() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;

    let body = ctx
        .server
        .get(&format!("/enrollment/{}", approved.enrollment_id))
        .await
        .json::<Value>();
    assert_eq!(body["enrollment"]["status"], json!("approved"));
    assert_eq!(body["enrollment"]["schedule"][0]["day"], json!("Monday"));

    let listing = ctx
        .server
        .get(&format!("/courseOffering/{}/enrollments", approved.offering_id))
        .await
        .json::<Value>();
    assert_eq!(listing["enrollments"].as_array().unwrap().len(), 1);
}

async fn offering_for(ctx: &TestContext, course_id: Uuid, faculty_id: Uuid, branches: Value) -> Uuid {
    let response = ctx
        .server
        .post("/courseOffering")
        .json(&json!({
            "courseId": course_id,
            "semester": 1,
            "year": YEAR,
            "branches": branches,
            "coordinatorId": faculty_id,
            "instructorIds": [faculty_id]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    id_at(&response.json::<Value>(), "offering")
}

#[tokio::test]
async fn offerings_restricted_to_other_branches_refuse_the_student() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "isRegistrationOpen": true })).await;
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 3).await;
    let student_id = ctx.create_student("Male").await;

    let open_to_cse = offering_for(&ctx, course_id, faculty_id, json!(["cse", "ECE"])).await;
    let electronics_only = offering_for(&ctx, course_id, faculty_id, json!(["ECE", " IT "])).await;

    let response = ctx
        .server
        .post("/enrollment")
        .json(&json!({ "studentId": student_id, "offeringIds": [open_to_cse, electronics_only] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!(format!(
            "Offering {} is not open to the CSE department",
            electronics_only
        ))
    );

    // The batch is all or nothing.
    let body = ctx
        .server
        .get(&format!("/courseOffering/{}/enrollments", open_to_cse))
        .await
        .json::<Value>();
    assert_eq!(body["enrollments"], json!([]));

    assert_eq!(ctx.enroll(student_id, &[open_to_cse]).await.len(), 1);
}

#[tokio::test]
async fn dropped_enrollments_cannot_be_reapproved() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;
    let faculty_id = ctx
        .server
        .get(&format!("/enrollment/{}", approved.enrollment_id))
        .await
        .json::<Value>()["enrollment"]["facultyId"]
        .clone();

    ctx.server
        .put(&format!("/enrollment/{}/drop", approved.enrollment_id))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .put("/enrollment/assign")
        .json(&json!({
            "offeringId": approved.offering_id,
            "enrollmentIds": [approved.enrollment_id],
            "facultyId": faculty_id,
            "schedule": [
                { "day": "Tuesday", "startTime": "11:00:00", "endTime": "12:00:00", "room": "LH-2" }
            ]
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Invalid status transition from dropped to approved")
    );

    let response = ctx
        .server
        .put("/enrollment/status")
        .json(&json!({
            "enrollmentIds": [approved.enrollment_id],
            "status": "Attendance Failure"
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Invalid status transition from dropped to Attendance Failure")
    );
}

#[tokio::test]
async fn status_endpoint_cannot_approve() {
    let ctx = TestContext::new();
    ctx.update_settings(json!({ "isRegistrationOpen": true })).await;
    let faculty_id = ctx.create_faculty().await;
    let course_id = ctx.create_course("Theory", 3).await;
    let offering_id = ctx.create_offering(course_id, &[faculty_id]).await;
    let student_id = ctx.create_student("Female").await;
    let enrollment_id = ctx.enroll(student_id, &[offering_id]).await[0];

    let response = ctx
        .server
        .put("/enrollment/status")
        .json(&json!({ "enrollmentIds": [enrollment_id], "status": "approved" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("Status approved is set by assigning faculty")
    );

    let body = ctx
        .server
        .get(&format!("/enrollment/{}", enrollment_id))
        .await
        .json::<Value>();
    assert_eq!(body["enrollment"]["status"], json!("selected"));
    assert_eq!(body["enrollment"]["facultyId"], Value::Null);

    // Withdrawal outcomes are still set directly.
    let response = ctx
        .server
        .put("/enrollment/status")
        .json(&json!({ "enrollmentIds": [enrollment_id], "status": "dropped" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["enrollments"][0]["status"],
        json!("dropped")
    );
}

#[tokio::test]
async fn attendance_shortage_fails_the_enrollment() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Theory").await;

    let start = Utc::now().date_naive() - Duration::days(10);
    for (offset, status) in ["present", "absent", "absent", "absent"].iter().enumerate() {
        ctx.server
            .post("/attendance")
            .json(&json!({
                "date": start + Duration::days(offset as i64),
                "records": [{ "enrollmentId": approved.enrollment_id, "status": status }]
            }))
            .await
            .assert_status_ok();
    }

    let summary = ctx
        .server
        .get(&format!("/attendance/enrollment/{}", approved.enrollment_id))
        .await
        .json::<Value>();
    assert_eq!(summary["present"], json!(1));
    assert_eq!(summary["total"], json!(4));
    assert_eq!(summary["percentage"], json!(25.0));

    let response = ctx
        .server
        .post("/attendance/shortage")
        .json(&json!({ "offeringId": approved.offering_id }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["affected"],
        json!([approved.enrollment_id])
    );

    let body = ctx
        .server
        .get(&format!("/enrollment/{}", approved.enrollment_id))
        .await
        .json::<Value>();
    assert_eq!(body["enrollment"]["status"], json!("Attendance Failure"));
}

#[tokio::test]
async fn attendance_on_a_holiday_is_refused() {
    let ctx = TestContext::new();
    let approved = ctx.approved_enrollment("Lab").await;

    let today = Utc::now().date_naive();
    ctx.server
        .put("/academiccalendar")
        .json(&json!({
            "year": YEAR,
            "semester": 1,
            "registration": { "start": today - Duration::days(30), "end": today + Duration::days(30) },
            "classes": { "start": today - Duration::days(30), "end": today + Duration::days(90) },
            "exams": { "start": today + Duration::days(91), "end": today + Duration::days(100) },
            "holidays": [{ "date": today, "name": "Founders Day" }]
        }))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .post("/attendance")
        .json(&json!({
            "date": today,
            "records": [{ "enrollmentId": approved.enrollment_id, "status": "present" }]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        json!(format!("{} is a holiday (Founders Day)", today))
    );
}
