//! Moderation domain - admin review of submitted registrations

pub mod actions;
pub mod errors;
pub mod notifications;
pub mod policy;

pub use actions::{
    approve_registration, list_registrations, reject_registration, review_registration,
    Decision, ReviewOutcome,
};
pub use errors::ModerationError;
pub use policy::{ReviewPolicy, ReviewStep};
