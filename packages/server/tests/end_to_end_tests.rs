//! End-to-end flows: public submission through admin review.

mod common;

use crate::common::{jane_doe_form, png_bytes, MultipartForm, TestHarness};
use axum::http::StatusCode;
use registration_core::domains::moderation::notifications::APPROVED_SUBJECT;
use serde_json::json;

#[tokio::test]
async fn jane_doe_is_registered_then_approved() {
    let mut harness = TestHarness::new();

    // Public submission
    let submitted = harness.post_multipart("/api/register", jane_doe_form()).await;
    assert_eq!(submitted.status, StatusCode::CREATED);
    let registration = &submitted.json()["registration"];
    assert_eq!(registration["status"], "pending");
    let id = registration["id"].as_str().unwrap().to_string();

    // Admin review
    let cookie = harness.login().await;
    let approved = harness
        .post_json("/api/admin/approve", json!({ "id": id }), Some(&cookie))
        .await;
    assert_eq!(approved.status, StatusCode::OK);

    // Stored state and notification
    let row = &harness.deps.registrations.rows()[0];
    assert_eq!(row.status.as_str(), "approved");

    let emails = harness.queued_emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to, "jane@x.com");
    assert_eq!(emails[0].subject, APPROVED_SUBJECT);

    // Admin table reflects the decision
    let page = harness.get("/admin", Some(&cookie)).await;
    assert!(page.text().contains(r#"<td class="status">approved</td>"#));
}

#[tokio::test]
async fn underage_submission_is_refused_end_to_end() {
    let mut harness = TestHarness::new();
    let form = MultipartForm::new()
        .text("fullName", "Jane Doe")
        .text("tpNumber", "TP012345")
        .text("sex", "female")
        .text("age", "5")
        .text("email", "jane@x.com")
        .text("phone", "0123456789")
        .text("nationality", "Malaysia")
        .file("receipt", "receipt.png", "image/png", &png_bytes(2 * 1024));

    let response = harness.post_multipart("/api/register", form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.errors().iter().any(|e| e.contains("Age")));
    assert!(harness.deps.registrations.rows().is_empty());
    assert!(harness.deps.receipts.uploads().is_empty());
    assert!(harness.queued_emails().is_empty());
}
