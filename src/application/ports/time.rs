// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of audit and stock timestamps. Always UTC.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
