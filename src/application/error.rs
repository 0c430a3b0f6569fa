// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Whether the caller's input caused the failure, as opposed to storage
    /// or audit bookkeeping.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_) => true,
            Self::Infrastructure(_) => false,
            Self::Domain(err) => matches!(
                err,
                DomainError::Validation(_)
                    | DomainError::NotFound(_)
                    | DomainError::Conflict(_)
                    | DomainError::UnknownEntity(_)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_and_storage_failures_are_not_client_errors() {
        assert!(ApplicationError::not_found("product 3").is_client_error());
        let unknown = ApplicationError::from(DomainError::UnknownEntity("crate".into()));
        assert!(unknown.is_client_error());
        let audit = ApplicationError::from(DomainError::Audit("bad diff".into()));
        assert!(!audit.is_client_error());
        assert!(!ApplicationError::infrastructure("pool closed").is_client_error());
    }
}
