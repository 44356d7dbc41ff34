//! Notification outbox
//!
//! Workflows commit state first and then drop an email onto this channel. A
//! background worker owns delivery: failures are logged and never travel back
//! to the request that caused them.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{BaseEmailService, OutboundEmail};

#[derive(Clone)]
pub struct NotificationOutbox {
    tx: mpsc::UnboundedSender<OutboundEmail>,
}

impl NotificationOutbox {
    /// Create an outbox and the receiving end the worker drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundEmail>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Create an outbox with a worker already running on the current runtime
    pub fn spawn(email_service: Arc<dyn BaseEmailService>) -> (Self, JoinHandle<()>) {
        let (outbox, rx) = Self::channel();
        let handle = tokio::spawn(run_outbox_worker(rx, email_service));
        (outbox, handle)
    }

    /// Queue an email. Returns whether the hand-off succeeded.
    pub fn enqueue(&self, email: OutboundEmail) -> bool {
        let to = email.to.clone();
        match self.tx.send(email) {
            Ok(()) => {
                debug!(to = %to, "Email queued");
                true
            }
            Err(_) => {
                error!(to = %to, "Notification worker is gone, email dropped");
                false
            }
        }
    }
}

/// Deliver queued emails until every outbox handle is dropped
pub async fn run_outbox_worker(
    mut rx: mpsc::UnboundedReceiver<OutboundEmail>,
    email_service: Arc<dyn BaseEmailService>,
) {
    info!("Notification worker started");

    while let Some(email) = rx.recv().await {
        match email_service.send(&email).await {
            Ok(()) => info!(to = %email.to, subject = %email.subject, "Email sent"),
            Err(e) => warn!(
                to = %email.to,
                subject = %email.subject,
                error = %e,
                "Email delivery failed"
            ),
        }
    }

    info!("Notification worker stopped");
}
