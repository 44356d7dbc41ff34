use thiserror::Error;

/// Authorization errors raised at the workflow boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthorized")]
    AdminRequired,
}
