// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use super::{
    BaseEmailService, BaseReceiptStore, BaseRegistrationStore, NotificationOutbox, OutboundEmail,
    ServerDeps,
};
use crate::common::{Page, PageRequest, RegistrationId};
use crate::domains::moderation::ReviewPolicy;
use crate::domains::registration::models::{NewRegistration, Registration, RegistrationStatus};

// =============================================================================
// In-memory Registration Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryRegistrationStore {
    rows: Mutex<Vec<Registration>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    status_writes: AtomicUsize,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make insert and update_status return an error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make find_by_id, list and ping return an error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Place a row directly, bypassing intake
    pub fn seed(&self, registration: Registration) {
        self.rows.lock().unwrap().push(registration);
    }

    pub fn rows(&self) -> Vec<Registration> {
        self.rows.lock().unwrap().clone()
    }

    pub fn get(&self, id: RegistrationId) -> Option<Registration> {
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    /// Number of successful status writes
    pub fn status_writes(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("database unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRegistrationStore for InMemoryRegistrationStore {
    async fn insert(&self, new: NewRegistration) -> Result<Registration> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("database unavailable");
        }

        let mut rows = self.rows.lock().unwrap();
        // Keep created_at strictly increasing so ordering is stable in tests
        let mut created_at = Utc::now();
        if let Some(latest) = rows.iter().map(|r| r.created_at).max() {
            if created_at <= latest {
                created_at = latest + Duration::milliseconds(1);
            }
        }

        let registration = Registration {
            id: new.id,
            full_name: new.full_name,
            tp_number: new.tp_number,
            sex: new.sex,
            age: new.age,
            email: new.email,
            phone: new.phone,
            nationality: new.nationality,
            receipt_path: new.receipt_path,
            status: RegistrationStatus::Pending,
            created_at,
            updated_at: created_at,
        };
        rows.push(registration.clone());
        Ok(registration)
    }

    async fn find_by_id(&self, id: RegistrationId) -> Result<Option<Registration>> {
        self.check_reads()?;
        Ok(self.get(id))
    }

    async fn update_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("database unavailable");
        }

        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        row.status = status;
        row.updated_at = Utc::now();
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(row.clone()))
    }

    async fn list(&self, page: &PageRequest) -> Result<Page<Registration>> {
        self.check_reads()?;

        let mut rows = self.rows();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.into_uuid().cmp(&a.id.into_uuid()))
        });

        if let Some(cursor) = page.after {
            let after = cursor.into_uuid();
            match rows.iter().position(|r| r.id.into_uuid() == after) {
                Some(index) => {
                    rows.drain(..=index);
                }
                None => rows.clear(),
            }
        }

        if let Some(limit) = page.fetch_limit() {
            rows.truncate(limit as usize);
        }

        Ok(Page::from_fetched(rows, page, |r| r.id.into_uuid()))
    }

    async fn ping(&self) -> Result<()> {
        self.check_reads()
    }
}

// =============================================================================
// Mock Receipt Store
// =============================================================================

/// An upload captured by MockReceiptStore
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub path: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Default)]
pub struct MockReceiptStore {
    uploads: Mutex<Vec<RecordedUpload>>,
    removed: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MockReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    /// Blobs currently stored (removed ones are dropped)
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseReceiptStore for MockReceiptStore {
    async fn upload(&self, path: &str, content_type: &str, bytes: Bytes) -> Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("storage unavailable");
        }
        self.uploads.lock().unwrap().push(RecordedUpload {
            path: path.to_string(),
            content_type: content_type.to_string(),
            bytes,
        });
        Ok(path.to_string())
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let mut uploads = self.uploads.lock().unwrap();
        let before = uploads.len();
        uploads.retain(|u| u.path != path);
        if uploads.len() == before {
            anyhow::bail!("no stored receipt at {}", path);
        }
        self.removed.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

// =============================================================================
// Mock Email Service
// =============================================================================

#[derive(Default)]
pub struct MockEmailService {
    sent: Mutex<Vec<OutboundEmail>>,
    attempts: AtomicUsize,
    fail: AtomicBool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let service = Self::default();
        service.fail.store(true, Ordering::SeqCst);
        service
    }

    /// Successfully delivered messages
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Every send call, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("mail provider unavailable");
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of in-memory services plus the outbox receiver, so tests can
/// inspect queued emails without running a worker.
pub struct TestDependencies {
    pub registrations: Arc<InMemoryRegistrationStore>,
    pub receipts: Arc<MockReceiptStore>,
    pub outbox: NotificationOutbox,
    pub outbox_rx: mpsc::UnboundedReceiver<OutboundEmail>,
    pub review_policy: ReviewPolicy,
    pub registration_open: bool,
    pub support_phone: String,
}

impl TestDependencies {
    pub fn new() -> Self {
        let (outbox, outbox_rx) = NotificationOutbox::channel();
        Self {
            registrations: Arc::new(InMemoryRegistrationStore::new()),
            receipts: Arc::new(MockReceiptStore::new()),
            outbox,
            outbox_rx,
            review_policy: ReviewPolicy::default(),
            registration_open: true,
            support_phone: "+60-0000-0000".to_string(),
        }
    }

    pub fn with_review_policy(mut self, policy: ReviewPolicy) -> Self {
        self.review_policy = policy;
        self
    }

    pub fn with_receipts(mut self, receipts: MockReceiptStore) -> Self {
        self.receipts = Arc::new(receipts);
        self
    }

    pub fn closed(mut self) -> Self {
        self.registration_open = false;
        self
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.registrations.clone(),
            self.receipts.clone(),
            self.outbox.clone(),
            self.review_policy,
            self.registration_open,
            self.support_phone.clone(),
        )
    }

    /// Drain every email queued so far
    pub fn queued_emails(&mut self) -> Vec<OutboundEmail> {
        let mut emails = Vec::new();
        while let Ok(email) = self.outbox_rx.try_recv() {
            emails.push(email);
        }
        emails
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
