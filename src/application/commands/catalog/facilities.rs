// src/application/commands/catalog/facilities.rs
use super::CatalogCommandService;
use crate::{
    application::{dto::FacilityDto, error::ApplicationResult},
    domain::facility::{Facility, FacilityId, FacilityUpdate, NewFacility},
};

pub struct CreateFacilityCommand {
    pub name: String,
    pub contact_info: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub is_operating: Option<bool>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state_province_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

#[derive(Default)]
pub struct UpdateFacilityCommand {
    pub name: Option<String>,
    pub contact_info: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub is_operating: Option<bool>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state_province_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

impl CatalogCommandService {
    pub async fn create_facility(
        &self,
        command: CreateFacilityCommand,
    ) -> ApplicationResult<FacilityDto> {
        let mut new = NewFacility::new(command.name, command.latitude, command.longitude)?
            .with_address(
                command.street_address,
                command.city,
                command.state_province_region,
                command.postal_code,
            )
            .with_is_operating(command.is_operating.unwrap_or(true));
        new.contact_info = command.contact_info;
        new.country = command.country;
        new.notes = command.notes;

        let facility = self.create::<Facility>(new).await?;
        Ok(facility.into())
    }

    pub async fn update_facility(
        &self,
        id: i64,
        command: UpdateFacilityCommand,
    ) -> ApplicationResult<FacilityDto> {
        let id = FacilityId::new(id)?;
        let mut update = FacilityUpdate::new();
        if let Some(name) = command.name {
            update = update.with_name(name)?;
        }
        if let Some(latitude) = command.latitude {
            update = update.with_latitude(latitude)?;
        }
        if let Some(longitude) = command.longitude {
            update = update.with_longitude(longitude)?;
        }
        update.is_operating = command.is_operating;
        update.contact_info = command.contact_info.map(Some);
        update.street_address = command.street_address.map(Some);
        update.city = command.city.map(Some);
        update.state_province_region = command.state_province_region.map(Some);
        update.postal_code = command.postal_code.map(Some);
        update.country = command.country.map(Some);
        update.notes = command.notes.map(Some);

        let facility = self.update::<Facility>(id.into(), update).await?;
        Ok(facility.into())
    }

    /// Deletes the facility together with every stock entry it holds.
    pub async fn delete_facility(&self, id: i64) -> ApplicationResult<()> {
        let id = FacilityId::new(id)?;
        self.delete::<Facility>(id.into()).await
    }
}
