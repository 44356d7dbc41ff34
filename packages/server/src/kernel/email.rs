// Email service adapters (implement BaseEmailService)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use resend::models::SendEmailRequest;
use resend::ResendService;
use tracing::warn;

use super::{BaseEmailService, OutboundEmail};

// =============================================================================
// ResendService Adapter
// =============================================================================

/// Wrapper around ResendService that implements BaseEmailService
pub struct ResendAdapter {
    service: Arc<ResendService>,
    from: String,
}

impl ResendAdapter {
    pub fn new(service: Arc<ResendService>, from: impl Into<String>) -> Self {
        Self {
            service,
            from: from.into(),
        }
    }
}

#[async_trait]
impl BaseEmailService for ResendAdapter {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let request = SendEmailRequest {
            from: self.from.clone(),
            to: vec![email.to.clone()],
            subject: email.subject.clone(),
            html: email.html.clone(),
            reply_to: None,
        };

        self.service
            .send_email(&request)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// No-op sender (no provider configured)
// =============================================================================

/// Logs and drops every message. Used when RESEND_API_KEY is unset.
pub struct NoopEmailService;

#[async_trait]
impl BaseEmailService for NoopEmailService {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        warn!(
            to = %email.to,
            subject = %email.subject,
            "No email provider configured, message not sent"
        );
        Ok(())
    }
}
