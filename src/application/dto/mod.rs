// src/application/dto/mod.rs
pub mod audit;
pub mod catalog;
pub mod inventory;
pub mod pagination;
pub mod serde_time;

pub use audit::AuditRecordDto;
pub use catalog::{ComponentDto, FacilityDto, MapDataDto, ProductDto, UserDto};
pub use inventory::{
    ComponentStockDto, FacilityInventoryDto, ProductStockDto, SaveChangesReportDto,
};
pub use pagination::CursorPage;
