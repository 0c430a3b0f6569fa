// src/domain/inventory/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::ids::{
    ComponentId, ComponentInventoryId, FacilityId, ProductId, ProductInventoryId, UserId,
};
use crate::domain::record::{EntityRecord, Row};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;
use crate::domain::validation;
use chrono::{DateTime, Utc};

/// Stock of one product at one facility.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInventory {
    pub id: ProductInventoryId,
    pub product_id: ProductId,
    pub count: i64,
    pub production_facility_id: FacilityId,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_updated_by_user_id: UserId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProductInventory {
    pub product_id: ProductId,
    pub count: i64,
    pub production_facility_id: FacilityId,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_updated_by_user_id: UserId,
}

impl NewProductInventory {
    pub fn new(
        product_id: ProductId,
        production_facility_id: FacilityId,
        count: i64,
        updated_by: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            product_id,
            count: validation::count(count)?,
            production_facility_id,
            last_updated: Some(at),
            last_updated_by_user_id: updated_by,
        })
    }
}

/// Stock of one component at one facility.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInventory {
    pub id: ComponentInventoryId,
    pub component_id: ComponentId,
    pub count: i64,
    pub production_facility_id: FacilityId,
    pub last_updated: DateTime<Utc>,
    pub last_updated_by_user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComponentInventory {
    pub component_id: ComponentId,
    pub count: i64,
    pub production_facility_id: FacilityId,
    pub last_updated: DateTime<Utc>,
    pub last_updated_by_user_id: Option<UserId>,
}

impl NewComponentInventory {
    pub fn new(
        component_id: ComponentId,
        production_facility_id: FacilityId,
        count: i64,
        updated_by: Option<UserId>,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            component_id,
            count: validation::count(count)?,
            production_facility_id,
            last_updated: at,
            last_updated_by_user_id: updated_by,
        })
    }
}

/// A stock correction, shared by both inventory kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockUpdate {
    pub count: Option<i64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_updated_by_user_id: Option<UserId>,
}

impl StockUpdate {
    /// Set the count and stamp who changed it and when.
    pub fn recount(count: i64, updated_by: Option<UserId>, at: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            count: Some(validation::count(count)?),
            last_updated: Some(at),
            last_updated_by_user_id: updated_by,
        })
    }

    fn assignments(&self) -> FieldSnapshot {
        let mut fields = FieldSnapshot::new();
        if let Some(count) = self.count {
            fields.set("count", count);
        }
        if let Some(last_updated) = self.last_updated {
            fields.set("last_updated", last_updated);
        }
        if let Some(user) = self.last_updated_by_user_id {
            fields.set("last_updated_by_user_id", i64::from(user));
        }
        fields
    }
}

impl EntityRecord for ProductInventory {
    const KIND: EntityKind = EntityKind::ProductInventory;
    type New = NewProductInventory;
    type Update = StockUpdate;

    fn from_row(row: Row) -> DomainResult<Self> {
        let fields = &row.fields;
        Ok(Self {
            id: ProductInventoryId(row.id),
            product_id: ProductId(fields.required_integer("product_id")?),
            count: fields.required_integer("count")?,
            production_facility_id: FacilityId(fields.required_integer("production_facility_id")?),
            last_updated: fields.timestamp("last_updated")?,
            last_updated_by_user_id: UserId(fields.required_integer("last_updated_by_user_id")?),
        })
    }

    fn new_fields(new: &NewProductInventory) -> FieldSnapshot {
        FieldSnapshot::new()
            .with("product_id", new.product_id.0)
            .with("count", new.count)
            .with("production_facility_id", new.production_facility_id.0)
            .with("last_updated", new.last_updated)
            .with("last_updated_by_user_id", new.last_updated_by_user_id.0)
    }

    fn assignments(update: &StockUpdate) -> FieldSnapshot {
        update.assignments()
    }
}

impl EntityRecord for ComponentInventory {
    const KIND: EntityKind = EntityKind::ComponentInventory;
    type New = NewComponentInventory;
    type Update = StockUpdate;

    fn from_row(row: Row) -> DomainResult<Self> {
        let fields = &row.fields;
        Ok(Self {
            id: ComponentInventoryId(row.id),
            component_id: ComponentId(fields.required_integer("component_id")?),
            count: fields.required_integer("count")?,
            production_facility_id: FacilityId(fields.required_integer("production_facility_id")?),
            last_updated: fields.required_timestamp("last_updated")?,
            last_updated_by_user_id: fields.integer("last_updated_by_user_id")?.map(UserId),
        })
    }

    fn new_fields(new: &NewComponentInventory) -> FieldSnapshot {
        FieldSnapshot::new()
            .with("component_id", new.component_id.0)
            .with("count", new.count)
            .with("production_facility_id", new.production_facility_id.0)
            .with("last_updated", new.last_updated)
            .with("last_updated_by_user_id", new.last_updated_by_user_id.map(i64::from))
    }

    fn assignments(update: &StockUpdate) -> FieldSnapshot {
        update.assignments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn recount_stamps_the_change() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let update = StockUpdate::recount(5, Some(UserId(2)), at).unwrap();
        let fields = ProductInventory::assignments(&update);
        let names: Vec<_> = fields.names().collect();
        assert_eq!(names, vec!["count", "last_updated", "last_updated_by_user_id"]);
        assert!(StockUpdate::recount(-1, None, at).is_err());
    }

    #[test]
    fn component_inventory_tolerates_an_unknown_updater() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let new =
            NewComponentInventory::new(ComponentId(1), FacilityId(1), 3, None, at).unwrap();
        let fields = ComponentInventory::new_fields(&new);
        assert!(EntityKind::ComponentInventory.validate_row(&fields).is_ok());
    }
}
