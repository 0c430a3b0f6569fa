use super::CatalogQueryService;
use crate::{
    application::{
        dto::{ComponentStockDto, FacilityInventoryDto, MapDataDto, ProductStockDto},
        error::ApplicationResult,
    },
    domain::{
        component::Component,
        facility::Facility,
        inventory::{ComponentInventory, ProductInventory},
        product::Product,
        record::{RowFilter, RowQuery},
    },
};

impl CatalogQueryService {
    /// Product and component stock of one facility, each entry joined with
    /// the item it counts.
    pub async fn facility_inventory(&self, id: i64) -> ApplicationResult<FacilityInventoryDto> {
        let facility = self.get::<Facility>(id).await?;
        let by_facility = RowQuery::from(RowFilter::eq(
            "production_facility_id",
            i64::from(facility.id),
        ));

        let mut products = Vec::new();
        for entry in self.list::<ProductInventory>(&by_facility).await? {
            let product = self.get::<Product>(entry.product_id.into()).await?;
            let mut dto = ProductStockDto::from(entry);
            dto.product = Some(product.into());
            products.push(dto);
        }

        let mut components = Vec::new();
        for entry in self.list::<ComponentInventory>(&by_facility).await? {
            let component = self.get::<Component>(entry.component_id.into()).await?;
            let mut dto = ComponentStockDto::from(entry);
            dto.component = Some(component.into());
            components.push(dto);
        }

        Ok(FacilityInventoryDto {
            facility_id: facility.id.into(),
            products,
            components,
        })
    }

    pub async fn map_data(&self) -> ApplicationResult<MapDataDto> {
        Ok(self.list::<Facility>(&RowQuery::all()).await?.into_iter().collect())
    }
}
