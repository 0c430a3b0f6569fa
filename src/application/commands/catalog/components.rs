// src/application/commands/catalog/components.rs
use super::CatalogCommandService;
use crate::{
    application::{dto::ComponentDto, error::ApplicationResult},
    domain::component::{Component, ComponentId, ComponentUpdate, NewComponent},
};

#[derive(Default)]
pub struct CreateComponentCommand {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
}

#[derive(Default)]
pub struct UpdateComponentCommand {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
}

impl CatalogCommandService {
    pub async fn create_component(
        &self,
        command: CreateComponentCommand,
    ) -> ApplicationResult<ComponentDto> {
        let mut new = NewComponent::new();
        if let Some(price) = command.price {
            new = new.with_price(price)?;
        }
        new.name = command.name;
        new.category = command.category;
        new.brand = command.brand;
        new.model = command.model;
        new.specs = command.specs;

        let component = self.create::<Component>(new).await?;
        Ok(component.into())
    }

    pub async fn update_component(
        &self,
        id: i64,
        command: UpdateComponentCommand,
    ) -> ApplicationResult<ComponentDto> {
        let id = ComponentId::new(id)?;
        let mut update = ComponentUpdate::new();
        if let Some(price) = command.price {
            update = update.with_price(Some(price))?;
        }
        update.name = command.name.map(Some);
        update.category = command.category.map(Some);
        update.brand = command.brand.map(Some);
        update.model = command.model.map(Some);
        update.specs = command.specs.map(Some);

        let component = self.update::<Component>(id.into(), update).await?;
        Ok(component.into())
    }

    pub async fn delete_component(&self, id: i64) -> ApplicationResult<()> {
        let id = ComponentId::new(id)?;
        self.delete::<Component>(id.into()).await
    }
}
