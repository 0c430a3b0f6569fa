// src/application/dto/catalog.rs
use crate::domain::{component::Component, facility::Facility, product::Product, user::User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: String,
    pub price: f64,
    pub specs: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: bool,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            brand: product.brand,
            model: product.model,
            category: product.category,
            price: product.price,
            specs: product.specs,
            notes: product.notes,
            image_url: product.image_url,
            available: product.available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentDto {
    pub id: i64,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
}

impl From<Component> for ComponentDto {
    fn from(component: Component) -> Self {
        Self {
            id: component.id.into(),
            name: component.name,
            category: component.category,
            brand: component.brand,
            model: component.model,
            price: component.price,
            specs: component.specs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityDto {
    pub id: i64,
    pub name: String,
    pub contact_info: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub is_operating: bool,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state_province_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

impl From<Facility> for FacilityDto {
    fn from(facility: Facility) -> Self {
        Self {
            id: facility.id.into(),
            name: facility.name,
            contact_info: facility.contact_info,
            longitude: facility.longitude,
            latitude: facility.latitude,
            is_operating: facility.is_operating,
            street_address: facility.street_address,
            city: facility.city,
            state_province_region: facility.state_province_region,
            postal_code: facility.postal_code,
            country: facility.country,
            notes: facility.notes,
        }
    }
}

/// A user as exposed over the API; the password hash is never included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub role: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.into(),
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            title: user.title,
        }
    }
}

/// Facility coordinates as parallel arrays, ready for a map trace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MapDataDto {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub text: Vec<String>,
}

impl FromIterator<Facility> for MapDataDto {
    fn from_iter<I: IntoIterator<Item = Facility>>(iter: I) -> Self {
        let mut data = MapDataDto::default();
        for facility in iter {
            data.lat.push(facility.latitude);
            data.lon.push(facility.longitude);
            data.text.push(facility.name);
        }
        data
    }
}
