//! Moderation actions - called from admin HTTP handlers with an `Actor`

pub mod list_registrations;
pub mod review;

pub use list_registrations::list_registrations;
pub use review::{
    approve_registration, reject_registration, review_registration, Decision, ReviewOutcome,
};
