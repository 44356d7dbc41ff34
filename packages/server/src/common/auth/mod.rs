//! Authorization checks for workflow entry points.
//!
//! ```rust
//! use registration_core::common::auth::{Actor, AdminCapability};
//!
//! let actor = Actor::admin();
//! assert!(actor.can(AdminCapability::ReviewRegistrations).check().is_ok());
//! ```

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::AdminCapability;
pub use errors::AuthError;
