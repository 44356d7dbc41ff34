//! Admin session authority - shared-secret login and session token checks

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::jwt::{JwtService, ADMIN_ROLE, ADMIN_SUBJECT};

/// Name of the cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "admin-auth";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid password")]
    InvalidPassword,

    #[error("Failed to issue session token: {0}")]
    Signing(#[source] anyhow::Error),
}

#[derive(Clone)]
pub struct AdminSessionAuthority {
    admin_password: String,
    jwt: JwtService,
}

impl AdminSessionAuthority {
    /// `signing_secret` signs session tokens; pass the admin password when no
    /// separate secret is configured.
    pub fn new(admin_password: impl Into<String>, signing_secret: &str) -> Self {
        let admin_password = admin_password.into();
        if admin_password.is_empty() {
            warn!("Admin password is empty, admin login is disabled");
        }
        Self {
            admin_password,
            jwt: JwtService::new(signing_secret),
        }
    }

    /// Exchange the shared secret for a session token
    pub fn login(&self, password: &str) -> Result<String, SessionError> {
        if self.admin_password.is_empty() || password != self.admin_password {
            info!("Admin login rejected");
            return Err(SessionError::InvalidPassword);
        }

        let token = self.jwt.create_admin_token().map_err(|e| {
            error!(error = %e, "Failed to sign session token");
            SessionError::Signing(e)
        })?;

        info!("Admin logged in");
        Ok(token)
    }

    pub fn validate(&self, token: &str) -> bool {
        match self.jwt.verify_token(token) {
            Ok(claims) => claims.sub == ADMIN_SUBJECT && claims.role == ADMIN_ROLE,
            Err(e) => {
                debug!(error = %e, "Session token rejected");
                false
            }
        }
    }
}
