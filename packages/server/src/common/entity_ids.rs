//! Typed ID definitions for domain entities.

pub use super::id::{Id, V7};

/// Marker type for Registration entities (one workshop submission).
pub struct Registration;

/// Typed ID for Registration entities.
pub type RegistrationId = Id<Registration>;
