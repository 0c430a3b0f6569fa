mod facilities;
mod lookup;
mod service;

pub use lookup::{ListFacilitiesQuery, ListProductsQuery};
pub use service::CatalogQueryService;
