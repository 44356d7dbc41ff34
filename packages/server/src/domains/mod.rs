// Business domains
pub mod auth;
pub mod moderation;
pub mod registration;
