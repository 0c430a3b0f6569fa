// src/domain/audit/filter.rs
use crate::domain::audit::entity::{AuditOperation, AuditRecord};
use crate::domain::schema::EntityKind;
use chrono::{DateTime, Utc};

/// Conjunction of optional predicates over audit records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditLogFilter {
    pub object_id: Option<i64>,
    pub entity_type: Option<EntityKind>,
    pub operation: Option<AuditOperation>,
    /// Inclusive lower bound.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound.
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the object id, entity type, operation or
    /// description.
    pub search: Option<String>,
}

impl AuditLogFilter {
    pub fn for_object(entity_type: EntityKind, object_id: i64) -> Self {
        Self {
            object_id: Some(object_id),
            entity_type: Some(entity_type),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &AuditRecord) -> bool {
        if self.object_id.is_some_and(|id| id != record.object_id()) {
            return false;
        }
        if self.entity_type.is_some_and(|kind| kind != record.entity_type()) {
            return false;
        }
        if self.operation.is_some_and(|op| op != record.operation()) {
            return false;
        }
        if self.from.is_some_and(|from| record.timestamp() < from) {
            return false;
        }
        if self.to.is_some_and(|to| record.timestamp() >= to) {
            return false;
        }
        match self.search.as_deref() {
            None => true,
            // ASCII-only case folding, matching SQLite `LIKE`
            Some(needle) => {
                let needle = needle.to_ascii_lowercase();
                record.object_id().to_string().contains(&needle)
                    || record.entity_type().as_str().contains(&needle)
                    || record.operation().as_str().contains(&needle)
                    || record.description().to_ascii_lowercase().contains(&needle)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("desc") => Some(SortOrder::Desc),
            Some("asc") => Some(SortOrder::Asc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::entity::NewAuditRecord;
    use chrono::TimeZone;

    fn record(op: AuditOperation, hour: u32) -> AuditRecord {
        AuditRecord::new(
            1,
            NewAuditRecord {
                object_id: 7,
                entity_type: EntityKind::Product,
                operation: op,
                description: "Price changed from 1.0 to 2.0".into(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            },
        )
    }

    #[test]
    fn time_window_is_half_open() {
        let filter = AuditLogFilter {
            from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            ..AuditLogFilter::default()
        };
        assert!(filter.matches(&record(AuditOperation::Update, 10)));
        assert!(!filter.matches(&record(AuditOperation::Update, 12)));
    }

    #[test]
    fn search_is_case_insensitive() {
        let filter = AuditLogFilter {
            search: Some("PRICE".into()),
            ..AuditLogFilter::default()
        };
        assert!(filter.matches(&record(AuditOperation::Update, 9)));
        let filter = AuditLogFilter {
            operation: Some(AuditOperation::Delete),
            ..AuditLogFilter::default()
        };
        assert!(!filter.matches(&record(AuditOperation::Update, 9)));
    }

    #[test]
    fn search_folds_ascii_case_only() {
        let entry = AuditRecord::new(
            2,
            NewAuditRecord {
                object_id: 3,
                entity_type: EntityKind::Facility,
                operation: AuditOperation::Update,
                description: "street_address changed from Ölweg 1 to Hauptstraße 2".into(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            },
        );
        let search = |q: &str| AuditLogFilter {
            search: Some(q.into()),
            ..AuditLogFilter::default()
        };
        assert!(search("HAUPT").matches(&entry));
        assert!(search("Ölweg").matches(&entry));
        assert!(!search("ölweg").matches(&entry));
    }
}
