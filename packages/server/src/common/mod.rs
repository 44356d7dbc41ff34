// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod html;
pub mod id;
pub mod pagination;

pub use auth::{Actor, AdminCapability, AuthError};
pub use entity_ids::*;
pub use id::{Id, V7};
pub use pagination::{Cursor, Page, PageRequest};
