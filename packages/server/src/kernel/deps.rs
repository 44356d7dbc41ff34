//! Server dependencies for workflows (using traits for testability)
//!
//! This module provides the central dependency container used by intake and
//! moderation. All external services use trait abstractions to enable testing.

use std::sync::Arc;

use crate::domains::moderation::ReviewPolicy;
use crate::kernel::{BaseReceiptStore, BaseRegistrationStore, NotificationOutbox};

/// Server dependencies accessible to workflows
#[derive(Clone)]
pub struct ServerDeps {
    pub registrations: Arc<dyn BaseRegistrationStore>,
    pub receipts: Arc<dyn BaseReceiptStore>,
    /// Hand-off to the mail worker; sending never blocks a workflow
    pub outbox: NotificationOutbox,
    pub review_policy: ReviewPolicy,
    /// Intake refuses submissions when false
    pub registration_open: bool,
    /// Contact printed in rejection emails
    pub support_phone: String,
}

impl ServerDeps {
    pub fn new(
        registrations: Arc<dyn BaseRegistrationStore>,
        receipts: Arc<dyn BaseReceiptStore>,
        outbox: NotificationOutbox,
        review_policy: ReviewPolicy,
        registration_open: bool,
        support_phone: String,
    ) -> Self {
        Self {
            registrations,
            receipts,
            outbox,
            review_policy,
            registration_open,
            support_phone,
        }
    }
}
