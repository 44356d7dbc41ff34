// HTTP routes
pub mod admin;
pub mod health;
pub mod pages;
pub mod register;

pub use admin::*;
pub use health::*;
pub use pages::*;
pub use register::*;
