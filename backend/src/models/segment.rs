//! Itinerary segment model
//!
//! Segments are stored in sell order and re-sorted by travel date only when
//! the element index is rebuilt. Cancellation never removes a segment; it
//! flips the status so the history stays visible on screen.

use serde::{Deserialize, Serialize};

/// Segment status code.
///
/// `HK` is a confirmed active segment. `HX` and `XX` are the two cancelled
/// variants; both count as "already cancelled" for every eligibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SegmentStatus {
    Hk,
    Hx,
    Xx,
}

impl SegmentStatus {
    pub fn code(&self) -> &'static str {
        match self {
            SegmentStatus::Hk => "HK",
            SegmentStatus::Hx => "HX",
            SegmentStatus::Xx => "XX",
        }
    }
}

/// One flight segment on the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Two-character carrier code
    pub carrier: String,

    pub flight_no: u32,

    /// Booking class (RBD), a single letter
    pub booking_class: char,

    /// Travel date in `ddMMM` form, e.g. `26DEC`
    pub date_ddmmm: String,

    pub origin: String,
    pub destination: String,

    /// Departure / arrival in `HHMM`
    pub dep_time: String,
    pub arr_time: String,

    pub status: SegmentStatus,

    /// Seats sold on this segment
    pub pax_count: u32,
}

impl Segment {
    pub fn is_active(&self) -> bool {
        self.status == SegmentStatus::Hk
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, SegmentStatus::Hx | SegmentStatus::Xx)
    }

    /// `ORGDST ddMMM` route string used by receipts.
    pub fn route_string(&self) -> String {
        format!("{}{} {}", self.origin, self.destination, self.date_ddmmm)
    }

    /// Stable identity used for content-derived record locators.
    pub fn identity(&self) -> String {
        format!(
            "{}{:04}{}{}{}{}",
            self.carrier,
            self.flight_no,
            self.booking_class,
            self.date_ddmmm,
            self.origin,
            self.destination
        )
    }
}
