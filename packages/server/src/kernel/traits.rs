// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Intake and moderation are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseRegistrationStore, BaseEmailService)

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::common::{Page, PageRequest, RegistrationId};
use crate::domains::registration::models::{NewRegistration, Registration, RegistrationStatus};

// =============================================================================
// Registration Store Trait (Infrastructure - structured data)
// =============================================================================

#[async_trait]
pub trait BaseRegistrationStore: Send + Sync {
    /// Insert a new row; the store assigns `status = pending` and `created_at`
    async fn insert(&self, registration: NewRegistration) -> Result<Registration>;

    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<Registration>>;

    /// Single-row status write. Returns None if the id is unknown.
    async fn update_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>>;

    /// Newest `created_at` first
    async fn list(&self, page: &PageRequest) -> Result<Page<Registration>>;

    /// Connectivity probe for the health endpoint
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Receipt Store Trait (Infrastructure - object storage)
// =============================================================================

#[async_trait]
pub trait BaseReceiptStore: Send + Sync {
    /// Store a blob at `path` and return the stored path
    async fn upload(&self, path: &str, content_type: &str, bytes: Bytes) -> Result<String>;

    /// Delete a previously stored blob
    async fn remove(&self, path: &str) -> Result<()>;
}

// =============================================================================
// Email Service Trait (Infrastructure - mail provider)
// =============================================================================

/// A rendered message ready for the mail provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}
