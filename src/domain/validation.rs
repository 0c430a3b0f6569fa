// src/domain/validation.rs
use crate::domain::errors::{DomainError, DomainResult};

pub(crate) fn non_blank(field: &str, value: impl Into<String>) -> DomainResult<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

pub(crate) fn price(value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::Validation(
            "price must be a non-negative number".into(),
        ));
    }
    Ok(value)
}

pub(crate) fn count(value: i64) -> DomainResult<i64> {
    if value < 0 {
        return Err(DomainError::Validation("count cannot be negative".into()));
    }
    Ok(value)
}

pub(crate) fn latitude(value: f64) -> DomainResult<f64> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(DomainError::Validation(
            "latitude must be between -90 and 90".into(),
        ));
    }
    Ok(value)
}

pub(crate) fn longitude(value: f64) -> DomainResult<f64> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(DomainError::Validation(
            "longitude must be between -180 and 180".into(),
        ));
    }
    Ok(value)
}
