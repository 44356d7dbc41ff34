//! Registration domain - public intake of workshop submissions

pub mod actions;
pub mod errors;
pub mod models;
pub mod receipt;
pub mod validation;

pub use actions::submit_registration;
pub use errors::IntakeError;
pub use models::{NewRegistration, Registration, RegistrationStatus, Sex};
pub use validation::{ReceiptUpload, RegistrationForm, ValidationErrors};
