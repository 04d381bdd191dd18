//! Query-string definitions backing the gallery routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing search parameters.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid value: {0}")]
    InvalidValue(#[from] TypeConstraintError),
}
