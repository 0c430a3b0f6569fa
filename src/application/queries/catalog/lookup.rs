use super::CatalogQueryService;
use crate::{
    application::{
        dto::{ComponentDto, FacilityDto, ProductDto, UserDto},
        error::ApplicationResult,
    },
    domain::{
        component::Component, facility::Facility, product::Product, record::RowQuery, user::User,
    },
};

const PRODUCT_SEARCH: &[&str] = &["id", "category", "brand", "model"];
const FACILITY_SEARCH: &[&str] = &[
    "name",
    "contact_info",
    "city",
    "state_province_region",
    "country",
];

/// Product listing: `q` searches id, category, brand and model; the other
/// fields must match exactly.
#[derive(Debug, Default)]
pub struct ListProductsQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub available: Option<bool>,
}

impl ListProductsQuery {
    fn to_row_query(&self) -> RowQuery {
        RowQuery::all()
            .filter_opt("category", self.category.clone())
            .filter_opt("brand", self.brand.clone())
            .filter_opt("available", self.available)
            .search(PRODUCT_SEARCH, self.q.clone())
    }
}

/// Facility listing: `q` searches name, contact info and location columns.
/// Operating facilities come first.
#[derive(Debug, Default)]
pub struct ListFacilitiesQuery {
    pub q: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state_province_region: Option<String>,
    pub country: Option<String>,
    pub is_operating: Option<bool>,
}

impl ListFacilitiesQuery {
    fn to_row_query(&self) -> RowQuery {
        RowQuery::all()
            .filter_opt("name", self.name.clone())
            .filter_opt("city", self.city.clone())
            .filter_opt("state_province_region", self.state_province_region.clone())
            .filter_opt("country", self.country.clone())
            .filter_opt("is_operating", self.is_operating)
            .search(FACILITY_SEARCH, self.q.clone())
            .order_by("is_operating", true)
    }
}

impl CatalogQueryService {
    pub async fn get_product(&self, id: i64) -> ApplicationResult<ProductDto> {
        Ok(self.get::<Product>(id).await?.into())
    }

    pub async fn list_products(
        &self,
        query: ListProductsQuery,
    ) -> ApplicationResult<Vec<ProductDto>> {
        let rows = self.list::<Product>(&query.to_row_query()).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_component(&self, id: i64) -> ApplicationResult<ComponentDto> {
        Ok(self.get::<Component>(id).await?.into())
    }

    pub async fn list_components(&self) -> ApplicationResult<Vec<ComponentDto>> {
        let rows = self.list::<Component>(&RowQuery::all()).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_facility(&self, id: i64) -> ApplicationResult<FacilityDto> {
        Ok(self.get::<Facility>(id).await?.into())
    }

    pub async fn list_facilities(
        &self,
        query: ListFacilitiesQuery,
    ) -> ApplicationResult<Vec<FacilityDto>> {
        let rows = self.list::<Facility>(&query.to_row_query()).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_user(&self, id: i64) -> ApplicationResult<UserDto> {
        Ok(self.get::<User>(id).await?.into())
    }

    pub async fn list_users(&self) -> ApplicationResult<Vec<UserDto>> {
        let rows = self.list::<User>(&RowQuery::all()).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
