//! Injected dependencies that are not data stores.
//!
//! Time is the only ambient dependency the reconciliation core needs: holds
//! are lazily expired by comparing their expiry against "now" at read time,
//! so the clock is abstracted behind a trait for deterministic tests.

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability.
///
/// Production code uses [`SystemClock`]; tests use the `FixedClock` from the
/// `ticket-inventory-testing` crate.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
