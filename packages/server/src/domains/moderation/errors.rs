use thiserror::Error;

use crate::common::{AuthError, RegistrationId};
use crate::domains::registration::models::RegistrationStatus;

#[derive(Error, Debug)]
pub enum ModerationError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("Registration not found: {0}")]
    NotFound(RegistrationId),

    #[error("Registration {id} is already {current}")]
    AlreadyDecided {
        id: RegistrationId,
        current: RegistrationStatus,
    },

    #[error("Registration store failed: {0}")]
    Storage(#[source] anyhow::Error),
}
