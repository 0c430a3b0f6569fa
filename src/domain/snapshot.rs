// src/domain/snapshot.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::fmt;

/// A single column value as seen by the persistence layer and the audit hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            // Debug keeps the fractional part of whole numbers ("10.0", not "10").
            Self::Real(v) => write!(f, "{v:?}"),
            Self::Text(v) => f.write_str(v),
            Self::Timestamp(v) => f.write_str(&v.to_rfc3339()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

static NULL: FieldValue = FieldValue::Null;

/// Ordered field-name to value mapping for one row, without its id.
///
/// Order is insertion order and is preserved by every operation; audit
/// descriptions rely on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSnapshot {
    fields: Vec<(&'static str, FieldValue)>,
}

impl FieldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Value of `name`, with absent fields read as null.
    pub fn value(&self, name: &str) -> &FieldValue {
        self.get(name).unwrap_or(&NULL)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of `self` with every field of `assigned` written over it.
    pub fn overlay(&self, assigned: &FieldSnapshot) -> FieldSnapshot {
        let mut merged = self.clone();
        for (name, value) in assigned.iter() {
            merged.set(name, value.clone());
        }
        merged
    }

    /// Copy of `self` keeping only the named fields.
    pub fn restrict(&self, names: &[&str]) -> FieldSnapshot {
        FieldSnapshot {
            fields: self
                .fields
                .iter()
                .filter(|(name, _)| names.contains(name))
                .cloned()
                .collect(),
        }
    }

    pub fn text(&self, name: &str) -> DomainResult<Option<String>> {
        match self.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Text(value)) => Ok(Some(value.clone())),
            Some(other) => Err(mismatch(name, "text", other)),
        }
    }

    pub fn required_text(&self, name: &str) -> DomainResult<String> {
        self.text(name)?.ok_or_else(|| missing(name))
    }

    pub fn integer(&self, name: &str) -> DomainResult<Option<i64>> {
        match self.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Integer(value)) => Ok(Some(*value)),
            Some(other) => Err(mismatch(name, "integer", other)),
        }
    }

    pub fn required_integer(&self, name: &str) -> DomainResult<i64> {
        self.integer(name)?.ok_or_else(|| missing(name))
    }

    pub fn real(&self, name: &str) -> DomainResult<Option<f64>> {
        match self.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Real(value)) => Ok(Some(*value)),
            #[allow(clippy::cast_precision_loss)]
            Some(FieldValue::Integer(value)) => Ok(Some(*value as f64)),
            Some(other) => Err(mismatch(name, "real", other)),
        }
    }

    pub fn required_real(&self, name: &str) -> DomainResult<f64> {
        self.real(name)?.ok_or_else(|| missing(name))
    }

    pub fn boolean(&self, name: &str) -> DomainResult<Option<bool>> {
        match self.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Bool(value)) => Ok(Some(*value)),
            Some(FieldValue::Integer(value)) => Ok(Some(*value != 0)),
            Some(other) => Err(mismatch(name, "boolean", other)),
        }
    }

    pub fn timestamp(&self, name: &str) -> DomainResult<Option<DateTime<Utc>>> {
        match self.get(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(FieldValue::Timestamp(value)) => Ok(Some(*value)),
            Some(other) => Err(mismatch(name, "timestamp", other)),
        }
    }

    pub fn required_timestamp(&self, name: &str) -> DomainResult<DateTime<Utc>> {
        self.timestamp(name)?.ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> DomainError {
    DomainError::Persistence(format!("field `{name}` is missing or null"))
}

fn mismatch(name: &str, expected: &str, found: &FieldValue) -> DomainError {
    DomainError::Persistence(format!(
        "field `{name}` holds {} where {expected} was expected",
        found.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_values_keep_their_fraction_when_displayed() {
        assert_eq!(FieldValue::Real(10.0).to_string(), "10.0");
        assert_eq!(FieldValue::Real(9.99).to_string(), "9.99");
        assert_eq!(FieldValue::Null.to_string(), "None");
    }

    #[test]
    fn set_replaces_in_place_and_keeps_order() {
        let mut snapshot = FieldSnapshot::new().with("brand", "X").with("price", 100.0);
        snapshot.set("brand", "Y");
        let names: Vec<_> = snapshot.names().collect();
        assert_eq!(names, vec!["brand", "price"]);
        assert_eq!(snapshot.get("brand"), Some(&FieldValue::Text("Y".into())));
    }

    #[test]
    fn overlay_and_restrict_compose() {
        let prior = FieldSnapshot::new()
            .with("brand", "X")
            .with("price", 100.0)
            .with("notes", None::<String>);
        let assigned = FieldSnapshot::new().with("price", 120.0);
        let current = prior.overlay(&assigned);
        assert_eq!(current.get("price"), Some(&FieldValue::Real(120.0)));
        assert_eq!(current.len(), 3);

        let restricted = current.restrict(&["price"]);
        assert_eq!(restricted.len(), 1);
        assert!(!restricted.contains("brand"));
    }

    #[test]
    fn typed_accessors_report_mismatches() {
        let snapshot = FieldSnapshot::new()
            .with("count", 3_i64)
            .with("available", 1_i64)
            .with("name", "widget");
        assert_eq!(snapshot.required_integer("count").unwrap(), 3);
        assert_eq!(snapshot.boolean("available").unwrap(), Some(true));
        assert_eq!(snapshot.real("count").unwrap(), Some(3.0));
        assert!(snapshot.integer("name").is_err());
        assert!(snapshot.required_text("missing").is_err());
        assert_eq!(snapshot.text("missing").unwrap(), None);
    }
}
