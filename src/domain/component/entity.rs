// src/domain/component/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::ids::ComponentId;
use crate::domain::record::{EntityRecord, Row};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;
use crate::domain::validation;

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
}

/// Every component column is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewComponent {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
}

impl NewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> DomainResult<Self> {
        self.price = Some(validation::price(price)?);
        Ok(self)
    }

    pub fn with_specs(mut self, specs: impl Into<String>) -> Self {
        self.specs = Some(specs.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentUpdate {
    pub name: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub brand: Option<Option<String>>,
    pub model: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub specs: Option<Option<String>>,
}

impl ComponentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_brand(mut self, brand: Option<String>) -> Self {
        self.brand = Some(brand);
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_price(mut self, price: Option<f64>) -> DomainResult<Self> {
        self.price = Some(price.map(validation::price).transpose()?);
        Ok(self)
    }

    pub fn with_specs(mut self, specs: Option<String>) -> Self {
        self.specs = Some(specs);
        self
    }
}

impl EntityRecord for Component {
    const KIND: EntityKind = EntityKind::Component;
    type New = NewComponent;
    type Update = ComponentUpdate;

    fn from_row(row: Row) -> DomainResult<Self> {
        let fields = &row.fields;
        Ok(Self {
            id: ComponentId(row.id),
            name: fields.text("name")?,
            category: fields.text("category")?,
            brand: fields.text("brand")?,
            model: fields.text("model")?,
            price: fields.real("price")?,
            specs: fields.text("specs")?,
        })
    }

    fn new_fields(new: &NewComponent) -> FieldSnapshot {
        FieldSnapshot::new()
            .with("name", new.name.clone())
            .with("category", new.category.clone())
            .with("brand", new.brand.clone())
            .with("model", new.model.clone())
            .with("price", new.price)
            .with("specs", new.specs.clone())
    }

    fn assignments(update: &ComponentUpdate) -> FieldSnapshot {
        let mut fields = FieldSnapshot::new();
        if let Some(name) = &update.name {
            fields.set("name", name.clone());
        }
        if let Some(category) = &update.category {
            fields.set("category", category.clone());
        }
        if let Some(brand) = &update.brand {
            fields.set("brand", brand.clone());
        }
        if let Some(model) = &update.model {
            fields.set("model", model.clone());
        }
        if let Some(price) = update.price {
            fields.set("price", price);
        }
        if let Some(specs) = &update.specs {
            fields.set("specs", specs.clone());
        }
        fields
    }
}
