// src/application/dto/inventory.rs
use super::serde_time;
use super::catalog::{ComponentDto, ProductDto};
use crate::domain::inventory::{ComponentInventory, ProductInventory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductStockDto {
    pub id: i64,
    pub product_id: i64,
    pub production_facility_id: i64,
    pub count: i64,
    #[serde(default, with = "serde_time::option")]
    pub last_updated: Option<DateTime<Utc>>,
    pub last_updated_by_user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
}

impl From<ProductInventory> for ProductStockDto {
    fn from(entry: ProductInventory) -> Self {
        Self {
            id: entry.id.into(),
            product_id: entry.product_id.into(),
            production_facility_id: entry.production_facility_id.into(),
            count: entry.count,
            last_updated: entry.last_updated,
            last_updated_by_user_id: entry.last_updated_by_user_id.into(),
            product: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentStockDto {
    pub id: i64,
    pub component_id: i64,
    pub production_facility_id: i64,
    pub count: i64,
    #[serde(with = "serde_time")]
    pub last_updated: DateTime<Utc>,
    pub last_updated_by_user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentDto>,
}

impl From<ComponentInventory> for ComponentStockDto {
    fn from(entry: ComponentInventory) -> Self {
        Self {
            id: entry.id.into(),
            component_id: entry.component_id.into(),
            production_facility_id: entry.production_facility_id.into(),
            count: entry.count,
            last_updated: entry.last_updated,
            last_updated_by_user_id: entry.last_updated_by_user_id.map(Into::into),
            component: None,
        }
    }
}

/// Every stock entry held by one facility.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityInventoryDto {
    pub facility_id: i64,
    pub products: Vec<ProductStockDto>,
    pub components: Vec<ComponentStockDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveChangesReportDto {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl SaveChangesReportDto {
    pub fn new(errors: Vec<String>, attempted: usize) -> Self {
        let msg = if errors.is_empty() {
            "Inventory updated successfully.".to_string()
        } else {
            format!("Errors occurred on {}/{} updates.", errors.len(), attempted)
        };
        Self { msg, errors }
    }
}
