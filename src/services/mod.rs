use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod gallery;
pub mod images;
pub mod suggestions;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("page {page} is outside 1..={total_pages}")]
    InvalidPage { page: usize, total_pages: usize },

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message) => ServiceError::Form(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
