// src/application/commands/catalog/inventory.rs
use super::CatalogCommandService;
use crate::{
    application::{
        dto::{ComponentStockDto, ProductStockDto, SaveChangesReportDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        ids::{ComponentId, FacilityId, ProductId, UserId},
        inventory::{
            ComponentInventory, NewComponentInventory, NewProductInventory, ProductInventory,
            StockUpdate,
        },
        record::EntityRecord,
        snapshot::FieldValue,
    },
};
use tracing::{error, warn};

pub struct CreateProductStockCommand {
    pub product_id: i64,
    pub production_facility_id: i64,
    pub count: i64,
    pub updated_by: i64,
}

pub struct CreateComponentStockCommand {
    pub component_id: i64,
    pub production_facility_id: i64,
    pub count: i64,
    pub updated_by: Option<i64>,
}

/// One requested correction from a batch save.
pub struct StockChange {
    /// `"product"` or `"component"`.
    pub entry_type: String,
    pub entry_id: i64,
    pub quantity: i64,
}

pub struct SaveChangesCommand {
    pub changes: Vec<StockChange>,
    pub updated_by: Option<i64>,
}

impl CatalogCommandService {
    pub async fn create_product_stock(
        &self,
        command: CreateProductStockCommand,
    ) -> ApplicationResult<ProductStockDto> {
        let new = NewProductInventory::new(
            ProductId::new(command.product_id)?,
            FacilityId::new(command.production_facility_id)?,
            command.count,
            UserId::new(command.updated_by)?,
            self.clock.now(),
        )?;
        let entry = self.create::<ProductInventory>(new).await?;
        Ok(entry.into())
    }

    pub async fn create_component_stock(
        &self,
        command: CreateComponentStockCommand,
    ) -> ApplicationResult<ComponentStockDto> {
        let new = NewComponentInventory::new(
            ComponentId::new(command.component_id)?,
            FacilityId::new(command.production_facility_id)?,
            command.count,
            command.updated_by.map(UserId::new).transpose()?,
            self.clock.now(),
        )?;
        let entry = self.create::<ComponentInventory>(new).await?;
        Ok(entry.into())
    }

    /// Apply each change in its own transaction. A failing change is reported
    /// and does not stop the others.
    pub async fn save_changes(
        &self,
        command: SaveChangesCommand,
    ) -> ApplicationResult<SaveChangesReportDto> {
        let updated_by = command.updated_by.map(UserId::new).transpose()?;
        let attempted = command.changes.len();
        let mut errors = Vec::new();
        for change in command.changes {
            let result = match change.entry_type.as_str() {
                "product" => {
                    self.recount::<ProductInventory>(change.entry_id, change.quantity, updated_by)
                        .await
                }
                "component" => {
                    self.recount::<ComponentInventory>(
                        change.entry_id,
                        change.quantity,
                        updated_by,
                    )
                    .await
                }
                _ => Err(ApplicationError::validation("Invalid inventory entry type.")),
            };
            if let Err(err) = result {
                if err.is_client_error() {
                    warn!(
                        entry_type = %change.entry_type,
                        entry_id = change.entry_id,
                        error = %err,
                        "inventory change rejected"
                    );
                } else {
                    error!(
                        entry_type = %change.entry_type,
                        entry_id = change.entry_id,
                        error = %err,
                        "inventory change failed"
                    );
                }
                errors.push(err.to_string());
            }
        }
        Ok(SaveChangesReportDto::new(errors, attempted))
    }

    async fn recount<T>(
        &self,
        entry_id: i64,
        quantity: i64,
        updated_by: Option<UserId>,
    ) -> ApplicationResult<()>
    where
        T: EntityRecord<Update = StockUpdate>,
    {
        let update = StockUpdate::recount(quantity, updated_by, self.clock.now())?;
        let mut session = self.sessions.begin().await?;
        let entry = session.find_row(T::KIND, entry_id).await?.ok_or_else(|| {
            ApplicationError::not_found(format!("{} entry {entry_id} not found", T::KIND.label()))
        })?;
        // an unchanged count leaves the entry and its stamp alone
        if entry.fields.get("count") == Some(&FieldValue::Integer(quantity)) {
            session.rollback().await?;
            return Ok(());
        }
        session.update::<T>(entry_id, &update).await?;
        session.commit().await?;
        Ok(())
    }
}
