//! Time Source Injection
//!
//! Rendering and stamping both depend on "today". The pipeline reads it
//! through this trait so tests and the CLI can pin the date.

use chrono::{NaiveDate, Utc};

/// Source of the issue date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Host clock, UTC calendar date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A pinned date, for deterministic output.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
