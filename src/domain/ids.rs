// src/domain/ids.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> DomainResult<Self> {
                if id <= 0 {
                    Err(DomainError::Validation(
                        concat!($label, " id must be positive").into(),
                    ))
                } else {
                    Ok(Self(id))
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(ProductId, "product");
entity_id!(ComponentId, "component");
entity_id!(FacilityId, "facility");
entity_id!(UserId, "user");
entity_id!(ProductInventoryId, "product inventory");
entity_id!(ComponentInventoryId, "component inventory");
