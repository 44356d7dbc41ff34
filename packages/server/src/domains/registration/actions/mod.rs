//! Registration domain actions - intake business logic
//!
//! Actions are plain async functions called from HTTP handlers with `ServerDeps`.

pub mod submit_registration;

pub use submit_registration::submit_registration;
