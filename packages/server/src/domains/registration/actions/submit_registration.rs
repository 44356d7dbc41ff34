//! Submit registration action - validate, store the receipt, record the row

use chrono::Utc;
use tracing::{error, info, warn};

use crate::common::RegistrationId;
use crate::domains::registration::errors::IntakeError;
use crate::domains::registration::models::{NewRegistration, Registration};
use crate::domains::registration::receipt::receipt_path;
use crate::domains::registration::validation::{validate, RegistrationForm};
use crate::kernel::ServerDeps;

/// Accept a public registration submission.
///
/// Nothing is written unless every field passes. The receipt is stored
/// before the row is inserted; if the insert fails the uploaded object is
/// deleted again on a best-effort basis.
pub async fn submit_registration(
    form: RegistrationForm,
    deps: &ServerDeps,
) -> Result<Registration, IntakeError> {
    if !deps.registration_open {
        info!("Submission refused: registration is closed");
        return Err(IntakeError::Closed);
    }

    let valid = validate(form).map_err(|errors| {
        info!(count = errors.messages().len(), "Submission failed validation");
        IntakeError::Validation(errors)
    })?;

    let path = receipt_path(
        Utc::now(),
        &valid.full_name,
        valid.receipt.file_name.as_deref(),
        &valid.receipt.content_type,
    );

    let stored_path = deps
        .receipts
        .upload(&path, &valid.receipt.content_type, valid.receipt.bytes.clone())
        .await
        .map_err(|e| {
            error!(path = %path, error = %e, "Receipt upload failed");
            IntakeError::ReceiptUpload(e)
        })?;

    let new = NewRegistration {
        id: RegistrationId::new(),
        full_name: valid.full_name,
        tp_number: valid.tp_number,
        sex: valid.sex,
        age: valid.age,
        email: valid.email,
        phone: valid.phone,
        nationality: valid.nationality,
        receipt_path: stored_path.clone(),
    };

    let registration = match deps.registrations.insert(new).await {
        Ok(registration) => registration,
        Err(e) => {
            warn!(error = %e, "Registration insert failed after receipt upload");
            if let Err(cleanup) = deps.receipts.remove(&stored_path).await {
                warn!(path = %stored_path, error = %cleanup, "Orphaned receipt left in storage");
            }
            return Err(IntakeError::Storage(e));
        }
    };

    info!(
        registration_id = %registration.id,
        receipt_path = %registration.receipt_path,
        "Registration submitted"
    );

    Ok(registration)
}
