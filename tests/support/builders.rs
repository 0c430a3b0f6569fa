// tests/support/builders.rs
use nexus_inventory::application::commands::catalog::{
    CreateFacilityCommand, CreateProductCommand, CreateUserCommand,
};

pub struct ProductBuilder {
    brand: Option<String>,
    model: Option<String>,
    category: String,
    price: f64,
}

impl ProductBuilder {
    pub fn new() -> Self {
        Self {
            brand: Some("X".into()),
            model: Some("M1".into()),
            category: "Laptops".into(),
            price: 100.0,
        }
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn build(self) -> CreateProductCommand {
        CreateProductCommand {
            brand: self.brand,
            model: self.model,
            category: self.category,
            price: self.price,
            specs: None,
            notes: None,
            image_url: None,
            available: Some(true),
        }
    }
}

pub fn facility_command(name: &str) -> CreateFacilityCommand {
    CreateFacilityCommand {
        name: name.into(),
        contact_info: Some("ops@example.com".into()),
        longitude: 139.69,
        latitude: 35.68,
        is_operating: None,
        street_address: None,
        city: Some("Tokyo".into()),
        state_province_region: None,
        postal_code: None,
        country: Some("Japan".into()),
        notes: None,
    }
}

pub fn user_command(username: &str) -> CreateUserCommand {
    CreateUserCommand {
        username: username.into(),
        password: "correct horse battery".into(),
        role: Some(1),
        first_name: None,
        last_name: None,
        phone_number: None,
        email: Some(format!("{username}@example.com")),
        title: None,
    }
}
