use thiserror::Error;

use super::validation::ValidationErrors;

/// Why a submission was not recorded
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Registration is closed")]
    Closed,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Receipt upload failed: {0}")]
    ReceiptUpload(#[source] anyhow::Error),

    #[error("Failed to save registration: {0}")]
    Storage(#[source] anyhow::Error),
}
