//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod email;
pub mod outbox;
pub mod pg_store;
pub mod receipt_storage;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use email::{NoopEmailService, ResendAdapter};
pub use outbox::{run_outbox_worker, NotificationOutbox};
pub use pg_store::PgRegistrationStore;
pub use receipt_storage::{LocalReceiptStore, SupabaseReceiptStore};
pub use test_dependencies::TestDependencies;
pub use traits::*;
