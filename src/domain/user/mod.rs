// src/domain/user/mod.rs
pub mod entity;
pub mod value_objects;

pub use crate::domain::ids::UserId;
pub use entity::{NewUser, User, UserUpdate};
pub use value_objects::{PasswordHash, Username};
