//! Availability simulator
//!
//! Synthesizes the flight list for an origin/destination/date query. All
//! generation is deterministic: the query fields seed the generator, so the
//! same search always shows the same flights with the same seat counts.
//!
//! Flights come out sorted by departure time (stable on ties by generation
//! order) and renumbered 1..N so SS can address them by line number.

use crate::rng::{Randomness, SeededRng};
use crate::sim::ProviderError;
use serde::{Deserialize, Serialize};

/// Booking classes in display order (dense premium-to-discount layout).
pub const BOOKING_CLASSES: [char; 22] = [
    'J', 'C', 'D', 'Y', 'E', 'B', 'M', 'H', 'K', 'Q', 'V', 'L', 'T', 'N', 'R', 'S', 'X', 'W',
    'A', 'F', 'Z', 'I',
];

/// Carrier pool the simulator draws from.
const CARRIER_POOL: [&str; 8] = ["PC", "SV", "AH", "AF", "TK", "LH", "BA", "IB"];

/// Availability query fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub from: String,
    pub to: String,
    /// Travel date in `ddMMM` form
    pub date_ddmmm: String,
    /// Two-letter weekday code for the header
    pub dow: String,
}

/// Seat availability of one booking class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAvail {
    pub code: char,
    pub seats: u8,
}

/// One synthesized flight row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// 1-based line number after departure-time sorting
    pub line_no: u32,
    pub carrier: String,
    pub flight_no: u32,
    pub from: String,
    pub to: String,
    pub date_ddmmm: String,
    pub dow: String,
    /// `HHMM`
    pub dep_time: String,
    pub arr_time: String,
    /// Weekly operating pattern (`DAILY` or day digits), shown by TN
    pub op_days: String,
    pub classes: Vec<ClassAvail>,
}

impl Flight {
    pub fn class(&self, code: char) -> Option<&ClassAvail> {
        self.classes.iter().find(|c| c.code == code)
    }
}

/// A stored search: the query plus its numbered results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySearch {
    pub query: AvailabilityQuery,
    pub flights: Vec<Flight>,
}

/// Availability source seam; the engine ships [`SimAvailability`].
pub trait AvailabilityProvider {
    fn search(&self, query: &AvailabilityQuery) -> Result<Vec<Flight>, ProviderError>;
}

/// The built-in deterministic simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimAvailability;

impl AvailabilityProvider for SimAvailability {
    fn search(&self, query: &AvailabilityQuery) -> Result<Vec<Flight>, ProviderError> {
        Ok(build_flights(query))
    }
}

fn format_hhmm(minutes: i64) -> String {
    let minutes = minutes.rem_euclid(24 * 60);
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

/// Seat counts follow the dense bucket layout of a busy city pair: business
/// and the premium-adjacent economy buckets stay rich, deep-discount classes
/// run dry. A seeded perturbation of +/-1 keeps rows from looking stamped.
fn class_availability(rng: &mut SeededRng) -> Vec<ClassAvail> {
    BOOKING_CLASSES
        .iter()
        .enumerate()
        .map(|(i, &code)| {
            let base: i64 = if i < 3 {
                9
            } else if i < 7 {
                4
            } else if i < 10 {
                9
            } else if i < 14 {
                4
            } else {
                0
            };
            let seats = (base + rng.range(-1, 2)).clamp(0, 9) as u8;
            ClassAvail { code, seats }
        })
        .collect()
}

fn operating_days(rng: &mut SeededRng) -> String {
    if rng.next_f64() < 0.5 {
        return "DAILY".to_string();
    }
    let days: String = (1u8..=7)
        .filter(|_| rng.next_f64() < 0.6)
        .map(|d| char::from(b'0' + d))
        .collect();
    if days.is_empty() {
        "6".to_string()
    } else {
        days
    }
}

/// Deterministically synthesize the flight list for a query.
pub fn build_flights(query: &AvailabilityQuery) -> Vec<Flight> {
    let mut rng = SeededRng::from_phrase(&format!(
        "AVAIL:{}:{}:{}",
        query.from, query.to, query.date_ddmmm
    ));

    let mut pool: Vec<&str> = CARRIER_POOL.to_vec();
    rng.shuffle(&mut pool);

    let count = 8 + rng.index(5);
    let mut flights: Vec<Flight> = (0..count)
        .map(|i| {
            let carrier = pool[i % pool.len()].to_string();
            let flight_no = 100 + rng.range(0, 9000) as u32;
            let dep_minutes = 300 + rng.range(0, 204) * 5;
            let duration = 75 + rng.range(0, 48) * 5;
            Flight {
                line_no: 0, // assigned after sorting
                carrier,
                flight_no,
                from: query.from.clone(),
                to: query.to.clone(),
                date_ddmmm: query.date_ddmmm.clone(),
                dow: query.dow.clone(),
                dep_time: format_hhmm(dep_minutes),
                arr_time: format_hhmm(dep_minutes + duration),
                op_days: operating_days(&mut rng),
                classes: class_availability(&mut rng),
            }
        })
        .collect();

    // Stable sort: equal departure times keep generation order.
    flights.sort_by(|a, b| a.dep_time.cmp(&b.dep_time));
    for (i, flight) in flights.iter_mut().enumerate() {
        flight.line_no = (i + 1) as u32;
    }
    flights
}
