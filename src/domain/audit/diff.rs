// src/domain/audit/diff.rs
use crate::domain::audit::change::ChangeDescriptor;
use crate::domain::snapshot::{FieldSnapshot, FieldValue};

/// Field-level changes between two snapshots of the same row.
///
/// Fields are reported in the order of `prior`, followed by fields that only
/// `current` carries. A field missing on one side is compared as null.
pub fn diff(prior: &FieldSnapshot, current: &FieldSnapshot) -> Vec<ChangeDescriptor> {
    let mut changes = Vec::new();
    for (name, old) in prior.iter() {
        let new = current.value(name);
        if old != new {
            changes.push(ChangeDescriptor::new(name, old.clone(), new.clone()));
        }
    }
    for (name, new) in current.iter() {
        if !prior.contains(name) && !new.is_null() {
            changes.push(ChangeDescriptor::new(name, FieldValue::Null, new.clone()));
        }
    }
    changes
}

/// Changes made by the pending assignments only.
///
/// Fields of `current` that were not assigned in this transaction are never
/// reported, even if they differ from `prior`.
pub fn diff_pending(
    prior: &FieldSnapshot,
    current: &FieldSnapshot,
    pending: &FieldSnapshot,
) -> Vec<ChangeDescriptor> {
    let assigned: Vec<&str> = pending.names().collect();
    diff(&prior.restrict(&assigned), &current.restrict(&assigned))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> FieldSnapshot {
        FieldSnapshot::new()
            .with("brand", "X")
            .with("model", "M1")
            .with("price", 100.0)
            .with("notes", None::<String>)
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        assert!(diff(&product(), &product()).is_empty());
    }

    #[test]
    fn changes_follow_field_order() {
        let current = product().with("price", 120.0).with("brand", "Y");
        let changes = diff(&product(), &current);
        let fields: Vec<_> = changes.iter().map(|change| change.field).collect();
        assert_eq!(fields, vec!["brand", "price"]);
        assert_eq!(changes[1].to_string(), "price changed from 100.0 to 120.0");
    }

    #[test]
    fn null_transitions_are_rendered_as_none() {
        let current = product().with("notes", "fragile");
        let changes = diff(&product(), &current);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to_string(), "notes changed from None to fragile");
    }

    #[test]
    fn reassigning_the_same_value_is_not_a_change() {
        let pending = FieldSnapshot::new().with("price", 100.0);
        let current = product().overlay(&pending);
        assert!(diff_pending(&product(), &current, &pending).is_empty());
    }

    #[test]
    fn unassigned_fields_are_ignored() {
        let pending = FieldSnapshot::new().with("model", "M2");
        // brand differs but was not assigned in this transaction
        let current = product().overlay(&pending).with("brand", "Z");
        let changes = diff_pending(&product(), &current, &pending);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "model");
    }
}
