pub mod backend;
pub mod identity;

pub use backend::MarketplaceBackend;
pub use identity::{Principal, Session};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not authorized: {0}")]
    Unauthorized(String),
    #[error("Remote service error: {0}")]
    RemoteError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
