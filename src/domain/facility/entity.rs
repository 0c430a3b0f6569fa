// src/domain/facility/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::ids::FacilityId;
use crate::domain::record::{EntityRecord, Row};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;
use crate::domain::validation;

/// A production facility and its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub id: FacilityId,
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

#[derive(Debug, Clone, PartialEq)]
pub struct NewFacility {
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

impl NewFacility {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> DomainResult<Self> {
        Ok(Self {
            name: validation::non_blank("name", name)?,
            contact_info: None,
            longitude: validation::longitude(longitude)?,
            latitude: validation::latitude(latitude)?,
            is_operating: true,
            street_address: None,
            city: None,
            state_province_region: None,
            postal_code: None,
            country: None,
            notes: None,
        })
    }

    pub fn with_contact_info(mut self, contact_info: impl Into<String>) -> Self {
        self.contact_info = Some(contact_info.into());
        self
    }

    pub fn with_is_operating(mut self, is_operating: bool) -> Self {
        self.is_operating = is_operating;
        self
    }

    pub fn with_address(
        mut self,
        street_address: Option<String>,
        city: Option<String>,
        state_province_region: Option<String>,
        postal_code: Option<String>,
    ) -> Self {
        self.street_address = street_address;
        self.city = city;
        self.state_province_region = state_province_region;
        self.postal_code = postal_code;
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityUpdate {
    pub name: Option<String>,
    pub contact_info: Option<Option<String>>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub is_operating: Option<bool>,
    pub street_address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub state_province_region: Option<Option<String>>,
    pub postal_code: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl FacilityUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> DomainResult<Self> {
        self.name = Some(validation::non_blank("name", name)?);
        Ok(self)
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> DomainResult<Self> {
        self.latitude = Some(validation::latitude(latitude)?);
        self.longitude = Some(validation::longitude(longitude)?);
        Ok(self)
    }

    pub fn with_latitude(mut self, latitude: f64) -> DomainResult<Self> {
        self.latitude = Some(validation::latitude(latitude)?);
        Ok(self)
    }

    pub fn with_longitude(mut self, longitude: f64) -> DomainResult<Self> {
        self.longitude = Some(validation::longitude(longitude)?);
        Ok(self)
    }

    pub fn with_is_operating(mut self, is_operating: bool) -> Self {
        self.is_operating = Some(is_operating);
        self
    }

    pub fn with_contact_info(mut self, contact_info: Option<String>) -> Self {
        self.contact_info = Some(contact_info);
        self
    }

    pub fn with_street_address(mut self, street_address: Option<String>) -> Self {
        self.street_address = Some(street_address);
        self
    }

    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = Some(city);
        self
    }

    pub fn with_state_province_region(mut self, region: Option<String>) -> Self {
        self.state_province_region = Some(region);
        self
    }

    pub fn with_postal_code(mut self, postal_code: Option<String>) -> Self {
        self.postal_code = Some(postal_code);
        self
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = Some(country);
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }
}

impl EntityRecord for Facility {
    const KIND: EntityKind = EntityKind::Facility;
    type New = NewFacility;
    type Update = FacilityUpdate;

    fn from_row(row: Row) -> DomainResult<Self> {
        let fields = &row.fields;
        Ok(Self {
            id: FacilityId(row.id),
            name: fields.required_text("name")?,
            contact_info: fields.text("contact_info")?,
            longitude: fields.required_real("longitude")?,
            latitude: fields.required_real("latitude")?,
            is_operating: fields.boolean("is_operating")?.unwrap_or(true),
            street_address: fields.text("street_address")?,
            city: fields.text("city")?,
            state_province_region: fields.text("state_province_region")?,
            postal_code: fields.text("postal_code")?,
            country: fields.text("country")?,
            notes: fields.text("notes")?,
        })
    }

    fn new_fields(new: &NewFacility) -> FieldSnapshot {
        FieldSnapshot::new()
            .with("name", new.name.clone())
            .with("contact_info", new.contact_info.clone())
            .with("longitude", new.longitude)
            .with("latitude", new.latitude)
            .with("is_operating", new.is_operating)
            .with("street_address", new.street_address.clone())
            .with("city", new.city.clone())
            .with("state_province_region", new.state_province_region.clone())
            .with("postal_code", new.postal_code.clone())
            .with("country", new.country.clone())
            .with("notes", new.notes.clone())
    }

    fn assignments(update: &FacilityUpdate) -> FieldSnapshot {
        let mut fields = FieldSnapshot::new();
        if let Some(name) = &update.name {
            fields.set("name", name.clone());
        }
        if let Some(contact_info) = &update.contact_info {
            fields.set("contact_info", contact_info.clone());
        }
        if let Some(longitude) = update.longitude {
            fields.set("longitude", longitude);
        }
        if let Some(latitude) = update.latitude {
            fields.set("latitude", latitude);
        }
        if let Some(is_operating) = update.is_operating {
            fields.set("is_operating", is_operating);
        }
        for (name, value) in [
            ("street_address", &update.street_address),
            ("city", &update.city),
            ("state_province_region", &update.state_province_region),
            ("postal_code", &update.postal_code),
            ("country", &update.country),
            ("notes", &update.notes),
        ] {
            if let Some(value) = value {
                fields.set(name, value.clone());
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_range_checked() {
        assert!(NewFacility::new("Plant", 91.0, 0.0).is_err());
        assert!(NewFacility::new("Plant", 0.0, -181.0).is_err());
        assert!(NewFacility::new("Plant", f64::NAN, 0.0).is_err());
        let facility = NewFacility::new("Plant", 48.1, 11.5).unwrap();
        assert!(facility.is_operating);
    }
}
