// src/application/commands/catalog/products.rs
use super::CatalogCommandService;
use crate::{
    application::{dto::ProductDto, error::ApplicationResult},
    domain::product::{NewProduct, Product, ProductId, ProductUpdate},
};

pub struct CreateProductCommand {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: String,
    pub price: f64,
    pub specs: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

/// Fields left as `None` keep their stored value.
#[derive(Default)]
pub struct UpdateProductCommand {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

impl CatalogCommandService {
    pub async fn create_product(&self, command: CreateProductCommand) -> ApplicationResult<ProductDto> {
        let mut new = NewProduct::new(command.category, command.price)?;
        new.brand = command.brand;
        new.model = command.model;
        new.specs = command.specs;
        new.notes = command.notes;
        new.image_url = command.image_url;
        new.available = command.available.unwrap_or(false);

        let product = self.create::<Product>(new).await?;
        Ok(product.into())
    }

    pub async fn update_product(
        &self,
        id: i64,
        command: UpdateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        let id = ProductId::new(id)?;
        let mut update = ProductUpdate::new();
        if let Some(category) = command.category {
            update = update.with_category(category)?;
        }
        if let Some(price) = command.price {
            update = update.with_price(price)?;
        }
        if let Some(available) = command.available {
            update = update.with_available(available);
        }
        update.brand = command.brand.map(Some);
        update.model = command.model.map(Some);
        update.specs = command.specs.map(Some);
        update.notes = command.notes.map(Some);
        update.image_url = command.image_url.map(Some);

        let product = self.update::<Product>(id.into(), update).await?;
        Ok(product.into())
    }

    pub async fn delete_product(&self, id: i64) -> ApplicationResult<()> {
        let id = ProductId::new(id)?;
        self.delete::<Product>(id.into()).await
    }
}
