use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod cache;
pub mod coordinator;
pub mod debounce;
pub mod employees;
pub mod query_state;

/// Errors returned by the directory services and the search coordinator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// User input failed validation; nothing was sent.
    #[error("{0}")]
    Form(#[from] FormError),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    /// `page` is one-based.
    #[error("page {page} is out of range, there are {total_pages} pages")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("employee not found")]
    NotFound,

    #[error("employee service error: {0}")]
    Repository(RepositoryError),

    #[error("the directory has been shut down")]
    Closed,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Whether the error came from user input rather than the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::Form(_)
                | ServiceError::TypeConstraint(_)
                | ServiceError::PageOutOfRange { .. }
                | ServiceError::InvalidPageSize
        )
    }

    /// Field a validation error belongs to, when known.
    pub fn field(&self) -> Option<&str> {
        match self {
            ServiceError::Form(err) => err.field(),
            ServiceError::PageOutOfRange { .. } => Some("page"),
            ServiceError::InvalidPageSize => Some("size"),
            _ => None,
        }
    }
}
