// src/domain/product/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::ids::ProductId;
use crate::domain::record::{EntityRecord, Row};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;
use crate::domain::validation;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: String,
    pub price: f64,
    pub specs: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: String,
    pub price: f64,
    pub specs: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: bool,
}

impl NewProduct {
    pub fn new(category: impl Into<String>, price: f64) -> DomainResult<Self> {
        Ok(Self {
            brand: None,
            model: None,
            category: validation::non_blank("category", category)?,
            price: validation::price(price)?,
            specs: None,
            notes: None,
            image_url: None,
            available: false,
        })
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_specs(mut self, specs: impl Into<String>) -> Self {
        self.specs = Some(specs.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

/// Assignments for an existing product. `None` leaves a field untouched;
/// `Some(None)` clears a nullable one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub brand: Option<Option<String>>,
    pub model: Option<Option<String>>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub available: Option<bool>,
}

impl ProductUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(mut self, brand: Option<String>) -> Self {
        self.brand = Some(brand);
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> DomainResult<Self> {
        self.category = Some(validation::non_blank("category", category)?);
        Ok(self)
    }

    pub fn with_price(mut self, price: f64) -> DomainResult<Self> {
        self.price = Some(validation::price(price)?);
        Ok(self)
    }

    pub fn with_specs(mut self, specs: Option<String>) -> Self {
        self.specs = Some(specs);
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }
}

impl EntityRecord for Product {
    const KIND: EntityKind = EntityKind::Product;
    type New = NewProduct;
    type Update = ProductUpdate;

    fn from_row(row: Row) -> DomainResult<Self> {
        let fields = &row.fields;
        Ok(Self {
            id: ProductId(row.id),
            brand: fields.text("brand")?,
            model: fields.text("model")?,
            category: fields.required_text("category")?,
            price: fields.required_real("price")?,
            specs: fields.text("specs")?,
            notes: fields.text("notes")?,
            image_url: fields.text("image_url")?,
            available: fields.boolean("available")?.unwrap_or(false),
        })
    }

    fn new_fields(new: &NewProduct) -> FieldSnapshot {
        FieldSnapshot::new()
            .with("brand", new.brand.clone())
            .with("model", new.model.clone())
            .with("category", new.category.clone())
            .with("price", new.price)
            .with("specs", new.specs.clone())
            .with("notes", new.notes.clone())
            .with("image_url", new.image_url.clone())
            .with("available", new.available)
    }

    fn assignments(update: &ProductUpdate) -> FieldSnapshot {
        let mut fields = FieldSnapshot::new();
        if let Some(brand) = &update.brand {
            fields.set("brand", brand.clone());
        }
        if let Some(model) = &update.model {
            fields.set("model", model.clone());
        }
        if let Some(category) = &update.category {
            fields.set("category", category.clone());
        }
        if let Some(price) = update.price {
            fields.set("price", price);
        }
        if let Some(specs) = &update.specs {
            fields.set("specs", specs.clone());
        }
        if let Some(notes) = &update.notes {
            fields.set("notes", notes.clone());
        }
        if let Some(image_url) = &update.image_url {
            fields.set("image_url", image_url.clone());
        }
        if let Some(available) = update.available {
            fields.set("available", available);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::FieldValue;

    #[test]
    fn new_product_rejects_negative_price() {
        assert!(NewProduct::new("Laptops", -1.0).is_err());
        assert!(NewProduct::new("  ", 1.0).is_err());
    }

    #[test]
    fn new_fields_cover_the_whole_schema() {
        let new = NewProduct::new("Laptops", 999.0).unwrap().with_brand("Acme");
        let fields = Product::new_fields(&new);
        assert!(EntityKind::Product.validate_row(&fields).is_ok());
        assert_eq!(fields.len(), EntityKind::Product.columns().len());
        assert_eq!(fields.get("model"), Some(&FieldValue::Null));
    }

    #[test]
    fn assignments_only_carry_touched_fields() {
        let update = ProductUpdate::new()
            .with_price(12.0)
            .unwrap()
            .with_notes(None);
        let fields = Product::assignments(&update);
        let names: Vec<_> = fields.names().collect();
        assert_eq!(names, vec!["price", "notes"]);
        assert_eq!(fields.get("notes"), Some(&FieldValue::Null));
    }
}
