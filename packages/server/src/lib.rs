// Workshop Registration - API Core
//
// Public intake of workshop registrations with payment receipts, and an admin
// moderation workflow that approves or rejects them and emails the outcome.
//
// Domain logic lives in domains/*; infrastructure traits and adapters in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
