//! HTTP error mapping for handler responses
//!
//! Every failure renders as `{ "ok": false, "errors": [...] }`. Storage
//! failures are logged here with their cause and reach the client as a
//! generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domains::auth::SessionError;
use crate::domains::moderation::ModerationError;
use crate::domains::registration::IntakeError;

pub const REGISTRATION_CLOSED: &str = "Registrations are closed.";
pub const RECEIPT_UPLOAD_FAILED: &str = "Failed to upload receipt. Please try again.";
pub const SAVE_FAILED: &str = "Failed to save registration.";
pub const UNAUTHORIZED: &str = "Unauthorized";
pub const INVALID_PASSWORD: &str = "Invalid password";
pub const MISSING_ID: &str = "Missing registration id";
pub const NOT_FOUND: &str = "Registration not found";
pub const UPDATE_FAILED: &str = "Failed to update registration status";
pub const INTERNAL: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// 400 with one message per problem
    BadRequest(Vec<String>),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(vec![msg.into()])
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized(UNAUTHORIZED.to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::BadRequest(errors) => errors.clone(),
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => vec![msg.clone()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "ok": false, "errors": self.messages() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Closed => ApiError::Forbidden(REGISTRATION_CLOSED.to_string()),
            IntakeError::Validation(errors) => ApiError::BadRequest(errors.into_messages()),
            IntakeError::ReceiptUpload(e) => {
                error!(error = ?e, "Receipt upload error");
                ApiError::internal(RECEIPT_UPLOAD_FAILED)
            }
            IntakeError::Storage(e) => {
                error!(error = ?e, "Registration insert error");
                ApiError::internal(SAVE_FAILED)
            }
        }
    }
}

impl From<ModerationError> for ApiError {
    fn from(err: ModerationError) -> Self {
        match err {
            ModerationError::Unauthorized(_) => ApiError::unauthorized(),
            ModerationError::NotFound(_) => ApiError::NotFound(NOT_FOUND.to_string()),
            ModerationError::AlreadyDecided { current, .. } => {
                ApiError::Conflict(format!("Registration is already {}", current))
            }
            ModerationError::Storage(e) => {
                error!(error = ?e, "Registration store error during moderation");
                ApiError::internal(UPDATE_FAILED)
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidPassword => ApiError::Unauthorized(INVALID_PASSWORD.to_string()),
            SessionError::Signing(_) => ApiError::internal(INTERNAL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{AuthError, RegistrationId};
    use crate::domains::registration::models::RegistrationStatus;
    use crate::domains::registration::ValidationErrors;

    #[test]
    fn test_intake_mapping() {
        let validation = ApiError::from(IntakeError::Validation(ValidationErrors(vec![
            "Age is invalid.".to_string(),
        ])));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.messages(), vec!["Age is invalid."]);

        let closed = ApiError::from(IntakeError::Closed);
        assert_eq!(closed.status(), StatusCode::FORBIDDEN);

        let upload = ApiError::from(IntakeError::ReceiptUpload(anyhow::anyhow!("s3 down")));
        assert_eq!(upload.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upload.messages(), vec![RECEIPT_UPLOAD_FAILED]);
    }

    #[test]
    fn test_moderation_mapping() {
        let id = RegistrationId::new();
        assert_eq!(
            ApiError::from(ModerationError::Unauthorized(AuthError::AdminRequired)).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(ModerationError::NotFound(id)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ModerationError::AlreadyDecided {
                id,
                current: RegistrationStatus::Approved
            })
            .status(),
            StatusCode::CONFLICT
        );

        let storage = ApiError::from(ModerationError::Storage(anyhow::anyhow!("db password=x")));
        assert_eq!(storage.messages(), vec![UPDATE_FAILED]);
    }
}
