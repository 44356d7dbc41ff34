//! Public registration endpoint tests
//!
//! Submissions go through the real router and multipart parsing; storage is
//! in-memory so the tests can inspect exactly what was written.

mod common;

use crate::common::{jane_doe_fields, jane_doe_form, png_bytes, MultipartForm, TestHarness};
use axum::http::StatusCode;
use registration_core::domains::registration::models::RegistrationStatus;
use registration_core::kernel::test_dependencies::MockReceiptStore;
use registration_core::kernel::TestDependencies;
use registration_core::server::REGISTER_BODY_LIMIT;

// ============================================================================
// Accepted submissions
// ============================================================================

#[tokio::test]
async fn valid_submission_returns_created_pending_registration() {
    let harness = TestHarness::new();

    let response = harness.post_multipart("/api/register", jane_doe_form()).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["registration"]["full_name"], "Jane Doe");
    assert_eq!(body["registration"]["status"], "pending");
    assert_eq!(body["registration"]["sex"], "female");
    assert_eq!(body["registration"]["age"], 21);

    let rows = harness.deps.registrations.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, RegistrationStatus::Pending);
    assert_eq!(body["registration"]["id"], rows[0].id.to_string());
}

#[tokio::test]
async fn stored_receipt_path_matches_upload() {
    let harness = TestHarness::new();

    harness.post_multipart("/api/register", jane_doe_form()).await;

    let uploads = harness.deps.receipts.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].content_type, "image/png");
    assert_eq!(uploads[0].bytes.len(), 2 * 1024);
    assert!(uploads[0].path.starts_with("workshop/"));
    assert!(uploads[0].path.ends_with("_jane_doe.png"));

    let row = &harness.deps.registrations.rows()[0];
    assert_eq!(row.receipt_path, uploads[0].path);
}

#[tokio::test]
async fn pdf_receipt_at_size_limit_is_accepted() {
    let harness = TestHarness::new();
    let form = jane_doe_fields().file(
        "receipt",
        "receipt.pdf",
        "application/pdf",
        &vec![b'%'; 5 * 1024 * 1024],
    );

    let response = harness.post_multipart("/api/register", form).await;

    assert_eq!(response.status, StatusCode::CREATED);
}

// ============================================================================
// Rejected submissions
// ============================================================================

#[tokio::test]
async fn age_out_of_range_is_rejected_without_side_effects() {
    let harness = TestHarness::new();
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
    assert_eq!(response.json()["ok"], false);
    assert_eq!(response.errors(), vec!["Age is invalid."]);
    assert!(harness.deps.registrations.rows().is_empty());
    assert!(harness.deps.receipts.uploads().is_empty());
}

#[tokio::test]
async fn empty_form_reports_every_problem_in_order() {
    let harness = TestHarness::new();

    let response = harness
        .post_multipart("/api/register", MultipartForm::new())
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.errors(),
        vec![
            "Full name is required.",
            "TP Number is required.",
            "Sex is invalid.",
            "Age is invalid.",
            "Valid email is required.",
            "Valid phone number is required.",
            "Nationality is required.",
            "Payment receipt is required.",
        ]
    );
}

#[tokio::test]
async fn wrong_receipt_type_is_rejected() {
    let harness = TestHarness::new();
    let form = jane_doe_fields().file("receipt", "receipt.gif", "image/gif", b"GIF89a");

    let response = harness.post_multipart("/api/register", form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Receipt file type is not allowed."]);
}

#[tokio::test]
async fn oversized_receipt_is_rejected() {
    let harness = TestHarness::new();
    let form = jane_doe_fields().file(
        "receipt",
        "receipt.png",
        "image/png",
        &png_bytes(5 * 1024 * 1024 + 1),
    );

    let response = harness.post_multipart("/api/register", form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Receipt file is too large (max 5MB)."]);
    assert!(harness.deps.receipts.uploads().is_empty());
}

#[tokio::test]
async fn receipt_over_request_limit_reports_size_error() {
    let harness = TestHarness::new();
    let form = jane_doe_fields().file(
        "receipt",
        "photo.png",
        "image/png",
        &png_bytes(REGISTER_BODY_LIMIT + 1024 * 1024),
    );

    let response = harness.post_multipart("/api/register", form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Receipt file is too large (max 5MB)."]);
    assert!(harness.deps.receipts.uploads().is_empty());
    assert!(harness.deps.registrations.rows().is_empty());
}

#[tokio::test]
async fn empty_file_part_counts_as_missing_receipt() {
    let harness = TestHarness::new();
    let form = jane_doe_fields().file("receipt", "", "application/octet-stream", b"");

    let response = harness.post_multipart("/api/register", form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Payment receipt is required."]);
}

#[tokio::test]
async fn non_multipart_body_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .post_json("/api/register", serde_json::json!({ "fullName": "Jane" }), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["ok"], false);
    assert!(harness.deps.registrations.rows().is_empty());
}

#[tokio::test]
async fn closed_registration_is_forbidden() {
    let harness = TestHarness::from_deps(TestDependencies::new().closed());

    let response = harness.post_multipart("/api/register", jane_doe_form()).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.errors(), vec!["Registrations are closed."]);
    assert!(harness.deps.receipts.uploads().is_empty());
}

// ============================================================================
// Storage failures
// ============================================================================

#[tokio::test]
async fn upload_failure_returns_500_and_creates_no_row() {
    let harness =
        TestHarness::from_deps(TestDependencies::new().with_receipts(MockReceiptStore::failing()));

    let response = harness.post_multipart("/api/register", jane_doe_form()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.errors(),
        vec!["Failed to upload receipt. Please try again."]
    );
    assert!(harness.deps.registrations.rows().is_empty());
}

#[tokio::test]
async fn insert_failure_returns_generic_500() {
    let harness = TestHarness::new();
    harness.deps.registrations.fail_writes(true);

    let response = harness.post_multipart("/api/register", jane_doe_form()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.errors(), vec!["Failed to save registration."]);
    assert!(!response.text().contains("database unavailable"));
    assert!(harness.deps.receipts.uploads().is_empty());
    assert_eq!(harness.deps.receipts.removed().len(), 1);
}
