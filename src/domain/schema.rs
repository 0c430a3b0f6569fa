// src/domain/schema.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::snapshot::{FieldSnapshot, FieldValue};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The fixed vocabulary of persisted entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,
    Component,
    Facility,
    User,
    ProductInventory,
    ComponentInventory,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Product,
        EntityKind::Component,
        EntityKind::Facility,
        EntityKind::User,
        EntityKind::ProductInventory,
        EntityKind::ComponentInventory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Component => "component",
            EntityKind::Facility => "facility",
            EntityKind::User => "user",
            EntityKind::ProductInventory => "product_inventory",
            EntityKind::ComponentInventory => "component_inventory",
        }
    }

    /// Human-readable name used in audit descriptions and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Component => "component",
            EntityKind::Facility => "facility",
            EntityKind::User => "user",
            EntityKind::ProductInventory => "product inventory",
            EntityKind::ComponentInventory => "component inventory",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Product => "products",
            EntityKind::Component => "components",
            EntityKind::Facility => "production_facilities",
            EntityKind::User => "users",
            EntityKind::ProductInventory => "product_inventory",
            EntityKind::ComponentInventory => "component_inventory",
        }
    }

    pub fn is_inventory(&self) -> bool {
        matches!(
            self,
            EntityKind::ProductInventory | EntityKind::ComponentInventory
        )
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            EntityKind::Product => PRODUCT_COLUMNS,
            EntityKind::Component => COMPONENT_COLUMNS,
            EntityKind::Facility => FACILITY_COLUMNS,
            EntityKind::User => USER_COLUMNS,
            EntityKind::ProductInventory => PRODUCT_INVENTORY_COLUMNS,
            EntityKind::ComponentInventory => COMPONENT_INVENTORY_COLUMNS,
        }
    }

    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns().iter().find(|column| column.name == name)
    }

    pub fn is_sensitive(&self, name: &str) -> bool {
        self.column(name).is_some_and(|column| column.sensitive)
    }

    /// Columns of other kinds that hold a cascading reference to this kind.
    pub fn dependents(&self) -> Vec<(EntityKind, &'static Column)> {
        EntityKind::ALL
            .iter()
            .flat_map(|kind| {
                kind.columns()
                    .iter()
                    .filter(|column| column.references == Some(*self))
                    .map(|column| (*kind, column))
            })
            .collect()
    }

    /// Check a full row about to be inserted.
    pub fn validate_row(&self, fields: &FieldSnapshot) -> DomainResult<()> {
        self.validate_assignments(fields)?;
        for column in self.columns() {
            if !column.nullable && fields.get(column.name).is_none_or(FieldValue::is_null) {
                return Err(DomainError::Validation(format!(
                    "{} requires `{}`",
                    self.label(),
                    column.name
                )));
            }
        }
        Ok(())
    }

    /// Check a partial set of assignments against the schema.
    ///
    /// A field unknown to the schema means the change history is malformed and
    /// fails as an audit error; a value of the wrong type is a validation error.
    pub fn validate_assignments(&self, fields: &FieldSnapshot) -> DomainResult<()> {
        for (name, value) in fields.iter() {
            let column = self.column(name).ok_or_else(|| {
                DomainError::Audit(format!("{} has no field `{name}`", self.label()))
            })?;
            if !column.accepts(value) {
                return Err(DomainError::Validation(format!(
                    "`{name}` of {} cannot hold a {} value",
                    self.label(),
                    value.type_name()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownEntity(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Boolean,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    /// Values never appear in audit descriptions.
    pub sensitive: bool,
    /// No two rows share a non-null value.
    pub unique: bool,
    /// Rows of the referenced kind own this row; deleting them deletes it.
    pub references: Option<EntityKind>,
}

impl Column {
    const fn required(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            sensitive: false,
            unique: false,
            references: None,
        }
    }

    const fn optional(name: &'static str, ty: ColumnType) -> Self {
        Self {
            nullable: true,
            ..Self::required(name, ty)
        }
    }

    const fn secret(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }

    const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    const fn owned_by(self, kind: EntityKind) -> Self {
        Self {
            references: Some(kind),
            ..self
        }
    }

    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self.ty, value) {
            (_, FieldValue::Null) => self.nullable,
            (ColumnType::Text, FieldValue::Text(_))
            | (ColumnType::Integer, FieldValue::Integer(_))
            | (ColumnType::Real, FieldValue::Real(_) | FieldValue::Integer(_))
            | (ColumnType::Boolean, FieldValue::Bool(_))
            | (ColumnType::Timestamp, FieldValue::Timestamp(_)) => true,
            _ => false,
        }
    }
}

use ColumnType::{Boolean, Integer, Real, Text, Timestamp};

const PRODUCT_COLUMNS: &[Column] = &[
    Column::optional("brand", Text),
    Column::optional("model", Text),
    Column::required("category", Text),
    Column::required("price", Real),
    Column::optional("specs", Text),
    Column::optional("notes", Text),
    Column::optional("image_url", Text),
    Column::required("available", Boolean),
];

const COMPONENT_COLUMNS: &[Column] = &[
    Column::optional("name", Text),
    Column::optional("category", Text),
    Column::optional("brand", Text),
    Column::optional("model", Text),
    Column::optional("price", Real),
    Column::optional("specs", Text),
];

const FACILITY_COLUMNS: &[Column] = &[
    Column::required("name", Text),
    Column::optional("contact_info", Text),
    Column::required("longitude", Real),
    Column::required("latitude", Real),
    Column::required("is_operating", Boolean),
    Column::optional("street_address", Text),
    Column::optional("city", Text),
    Column::optional("state_province_region", Text),
    Column::optional("postal_code", Text),
    Column::optional("country", Text),
    Column::optional("notes", Text),
];

const USER_COLUMNS: &[Column] = &[
    Column::required("username", Text).unique(),
    Column::required("password_hash", Text).secret(),
    Column::optional("role", Integer),
    Column::optional("first_name", Text),
    Column::optional("last_name", Text),
    Column::optional("phone_number", Text),
    Column::optional("email", Text),
    Column::optional("title", Text),
];

const PRODUCT_INVENTORY_COLUMNS: &[Column] = &[
    Column::required("product_id", Integer).owned_by(EntityKind::Product),
    Column::required("count", Integer),
    Column::required("production_facility_id", Integer).owned_by(EntityKind::Facility),
    Column::optional("last_updated", Timestamp),
    Column::required("last_updated_by_user_id", Integer),
];

const COMPONENT_INVENTORY_COLUMNS: &[Column] = &[
    Column::required("component_id", Integer).owned_by(EntityKind::Component),
    Column::required("count", Integer),
    Column::required("production_facility_id", Integer).owned_by(EntityKind::Facility),
    Column::required("last_updated", Timestamp),
    Column::optional("last_updated_by_user_id", Integer),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_parses_its_own_names() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
        assert!(matches!(
            "shipment".parse::<EntityKind>(),
            Err(DomainError::UnknownEntity(_))
        ));
    }

    #[test]
    fn facility_owns_both_inventories() {
        let dependents: Vec<_> = EntityKind::Facility
            .dependents()
            .into_iter()
            .map(|(kind, column)| (kind, column.name))
            .collect();
        assert_eq!(
            dependents,
            vec![
                (EntityKind::ProductInventory, "production_facility_id"),
                (EntityKind::ComponentInventory, "production_facility_id"),
            ]
        );
        assert!(EntityKind::User.dependents().is_empty());
    }

    #[test]
    fn unknown_assignment_is_an_audit_error() {
        let fields = FieldSnapshot::new().with("availability", true);
        let err = EntityKind::Product
            .validate_assignments(&fields)
            .unwrap_err();
        assert!(matches!(err, DomainError::Audit(_)));
    }

    #[test]
    fn missing_required_column_fails_row_validation() {
        let fields = FieldSnapshot::new().with("brand", "Acme").with("price", 10.0);
        let err = EntityKind::Product.validate_row(&fields).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn password_hash_is_sensitive() {
        assert!(EntityKind::User.is_sensitive("password_hash"));
        assert!(!EntityKind::User.is_sensitive("email"));
    }
}
