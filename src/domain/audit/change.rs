// src/domain/audit/change.rs
use crate::domain::snapshot::FieldValue;
use std::fmt;

const REDACTED: &str = "[redacted]";

/// One field-level change inside an update.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeDescriptor {
    pub field: &'static str,
    pub old: FieldValue,
    pub new: FieldValue,
}

impl ChangeDescriptor {
    pub fn new(field: &'static str, old: FieldValue, new: FieldValue) -> Self {
        Self { field, old, new }
    }

    /// Same change with both values masked.
    pub fn redacted(self) -> Self {
        Self {
            field: self.field,
            old: FieldValue::Text(REDACTED.into()),
            new: FieldValue::Text(REDACTED.into()),
        }
    }
}

impl fmt::Display for ChangeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} changed from {} to {}", self.field, self.old, self.new)
    }
}
