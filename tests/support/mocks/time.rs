// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, Utc};
use nexus_inventory::application::ports::time::Clock;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks/time.rs")
        .with_timezone(&Utc)
});

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// Always returns [`fixed_now`].
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Starts at [`fixed_now`] and advances one second per call, so every audit
/// record gets a distinct timestamp.
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            next: Mutex::new(fixed_now()),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock mutex poisoned");
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}
