// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    /// Field history could not be read or an audit record could not be built.
    #[error("audit failure: {0}")]
    Audit(String),
    #[error("unknown entity type: {0}")]
    UnknownEntity(String),
}
