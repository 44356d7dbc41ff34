//! Admin authentication - shared secret in, signed session cookie out

pub mod jwt;
pub mod session;

pub use jwt::{Claims, JwtService};
pub use session::{AdminSessionAuthority, SessionError, SESSION_COOKIE};
