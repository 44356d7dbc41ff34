// Postgres-backed registration store
//
// Thin adapter from BaseRegistrationStore to the SQL in models/registration.rs.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::BaseRegistrationStore;
use crate::common::{Page, PageRequest, RegistrationId};
use crate::domains::registration::models::{NewRegistration, Registration, RegistrationStatus};

#[derive(Clone)]
pub struct PgRegistrationStore {
    pool: PgPool,
}

impl PgRegistrationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseRegistrationStore for PgRegistrationStore {
    async fn insert(&self, registration: NewRegistration) -> Result<Registration> {
        Registration::insert(&registration, &self.pool)
            .await
            .context("Failed to insert registration")
    }

    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<Registration>> {
        Registration::find_by_id(id, &self.pool)
            .await
            .with_context(|| format!("Failed to load registration {}", id))
    }

    async fn update_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        Registration::update_status(id, status, &self.pool)
            .await
            .with_context(|| format!("Failed to set registration {} to {}", id, status))
    }

    async fn list(&self, page: &PageRequest) -> Result<Page<Registration>> {
        Registration::find_page(page, &self.pool)
            .await
            .context("Failed to list registrations")
    }

    async fn ping(&self) -> Result<()> {
        Registration::ping(&self.pool).await
    }
}
