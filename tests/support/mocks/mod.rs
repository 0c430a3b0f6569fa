// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod security;
pub mod stores;
pub mod time;

pub use security::DummyPasswordHasher;
pub use stores::RejectingStore;
pub use time::{FixedClock, SteppingClock, fixed_now};
