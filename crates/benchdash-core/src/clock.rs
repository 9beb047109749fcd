//! # Clock
//!
//! Source of "today" for timeline derivations.
//!
//! Status and progress depend on the current date. Callers inject a
//! [`Clock`] so the derivations stay deterministic under test and a
//! dashboard can be pinned to a reporting date.

use chrono::NaiveDate;

/// Provides the current calendar date.
pub trait Clock: Send + Sync {
    /// The date used as "now" by status and progress derivations.
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
