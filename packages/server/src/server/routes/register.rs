use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Extension, Multipart,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domains::registration::validation::RECEIPT_TOO_LARGE;
use crate::domains::registration::{submit_registration, ReceiptUpload, RegistrationForm};
use crate::server::app::AppState;
use crate::server::error::ApiError;

pub const INVALID_FORM: &str = "Invalid form data.";

/// Public registration endpoint (multipart/form-data)
pub async fn register_handler(
    Extension(state): Extension<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let multipart = multipart.map_err(|e| {
        warn!(error = %e, "Registration request is not multipart");
        ApiError::bad_request(INVALID_FORM)
    })?;
    let form = read_form(multipart).await?;
    let registration = submit_registration(form, &state.deps).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "registration": registration })),
    ))
}

/// Collect the known fields; unknown parts are ignored.
async fn read_form(mut multipart: Multipart) -> Result<RegistrationForm, ApiError> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Unreadable multipart body", e))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "receipt" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| multipart_error("Failed to read receipt part", e))?;

            // Browsers send an empty part when no file was chosen
            let empty = bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty();
            if !empty {
                form.receipt = Some(ReceiptUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| multipart_error("Failed to read form field", e))?;

        match name.as_str() {
            "fullName" => form.full_name = value,
            "tpNumber" => form.tp_number = value,
            "sex" => form.sex = value,
            "age" => form.age = value,
            "email" => form.email = value,
            "phone" => form.phone = value,
            "nationality" => form.nationality = value,
            other => debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// Bodies cut off by the request limit can only be an oversized receipt.
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error = %e, "{}: body exceeds limit", context);
        return ApiError::bad_request(RECEIPT_TOO_LARGE);
    }
    warn!(error = %e, "{}", context);
    ApiError::bad_request(INVALID_FORM)
}
