pub mod registration;

pub use registration::{NewRegistration, Registration, RegistrationStatus, Sex};
