use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::moderation::ReviewPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Shared admin secret compared against the login password
    pub admin_password: String,
    /// Key used to sign session tokens (defaults to the admin secret)
    pub session_secret: String,
    /// `Secure` cookies are only issued in production
    pub production: bool,
    pub resend_api_key: Option<String>,
    pub email_from: String,
    pub support_phone: String,
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub receipts_bucket: String,
    pub receipts_dir: String,
    pub review_policy: ReviewPolicy,
    pub registration_open: bool,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_password = var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
        let session_secret = var("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| admin_password.clone());

        Ok(Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_password,
            session_secret,
            production: var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            resend_api_key: var("RESEND_API_KEY").filter(|s| !s.is_empty()),
            email_from: var("EMAIL_FROM").unwrap_or_else(|| "no-reply@example.com".to_string()),
            support_phone: var("SUPPORT_PHONE").unwrap_or_else(|| "+60-0000-0000".to_string()),
            supabase_url: var("SUPABASE_URL").filter(|s| !s.is_empty()),
            supabase_service_role_key: var("SUPABASE_SERVICE_ROLE_KEY").filter(|s| !s.is_empty()),
            receipts_bucket: var("RECEIPTS_BUCKET").unwrap_or_else(|| "receipts".to_string()),
            receipts_dir: var("RECEIPTS_DIR").unwrap_or_else(|| "./receipts".to_string()),
            review_policy: var("REVIEW_POLICY")
                .map(|v| v.parse())
                .transpose()
                .context("REVIEW_POLICY must be 'unguarded' or 'guarded'")?
                .unwrap_or_default(),
            registration_open: var("REGISTRATION_OPEN")
                .map(|v| parse_bool(&v))
                .transpose()
                .context("REGISTRATION_OPEN must be true or false")?
                .unwrap_or(true),
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean: {}", other),
    }
}
