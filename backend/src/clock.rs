//! Time management for the simulation
//!
//! The simulation runs against calendar dates (travel dates, ticketing time
//! limits, the JD date display). This module provides the injectable clock
//! seam: production code uses [`SystemClock`], tests and training scripts
//! pin "now" with [`FixedClock`] so outputs are reproducible.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Injectable time source.
///
/// # Example
/// ```
/// use pnr_simulator_core::{Clock, FixedClock};
///
/// let clock = FixedClock::at_ymd(2030, 12, 1);
/// assert_eq!(clock.today().to_string(), "2030-12-01");
/// ```
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant.
///
/// Commands that consult "today" (date parsing year resolution, JD) become
/// fully deterministic under this clock.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Freeze at an explicit instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Freeze at noon UTC on the given date.
    ///
    /// # Panics
    /// Panics if the date is invalid.
    pub fn at_ymd(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid calendar date");
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
