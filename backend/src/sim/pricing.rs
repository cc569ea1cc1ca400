//! Pricing simulator
//!
//! Computes fares for an itinerary and passenger mix. The formula is shared
//! by all four pricing commands; only their side effects differ. Everything
//! is derived from phrase-seeded generators:
//!
//! - route distance is seeded from the alphabetically sorted city pair, so
//!   ALG-PAR and PAR-ALG are the same distance
//! - the per-segment offset is seeded from carrier/flight/date/pair with the
//!   booking class *excluded*; together with a ladder-monotone class
//!   multiplier this guarantees a rebooked itinerary never prices higher
//! - taxes come from the zone pair of each segment, scaled per passenger
//!   type, with a fixed surcharge when two segments form a round trip
//!
//! All published figures are rounded half-up to cents exactly once.

use crate::models::passenger::PaxType;
use crate::models::segment::Segment;
use crate::models::tst::{PaxFare, TaxLine};
use crate::money::to_cents;
use crate::rng::{Randomness, SeededRng};
use crate::sim::ProviderError;

/// Booking-class ladder, most expensive first. Rebooking moves right.
pub const CLASS_LADDER: [char; 22] = [
    'F', 'A', 'J', 'C', 'D', 'I', 'Z', 'W', 'S', 'Y', 'B', 'E', 'M', 'H', 'K', 'Q', 'V', 'L',
    'T', 'N', 'R', 'X',
];

/// Round-trip surcharge in euros, applied once per passenger.
const ROUND_TRIP_SURCHARGE: f64 = 25.0;

/// Fare per distance unit before class weighting.
const RATE_PER_KM: f64 = 0.11;

/// Which pricing command is asking. The formula is identical for all four;
/// providers receive the mode so overrides can specialize if they want to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMode {
    /// FXP: price and store, booking classes untouched
    Store,
    /// FXR: display a rebooked quote against the live TST, mutate nothing
    Quote,
    /// FXX: rebook to cheaper classes and update the live TST
    Rebook,
    /// FXB: best buy, rebook and store
    BestBuy,
}

/// Input to one pricing pass.
#[derive(Debug, Clone)]
pub struct PricingRequest {
    /// Active segments to price (classes already rebooked where relevant)
    pub segments: Vec<Segment>,
    /// Passenger mix, adults first; an empty mix prices as one adult
    pub pax_mix: Vec<(PaxType, u32)>,
    pub mode: PriceMode,
}

/// Output of one pricing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FareResult {
    pub pax_fares: Vec<PaxFare>,
    /// One fare basis code per priced segment
    pub fare_basis: Vec<String>,
    pub validating_carrier: String,
    pub currency: String,
    /// Grand total across the mix, in cents
    pub total: i64,
}

/// Pricing seam; the engine ships [`SimPricing`].
pub trait PricingProvider {
    fn price(&self, request: &PricingRequest) -> Result<FareResult, ProviderError>;

    /// Cheaper booking class per segment. `step` forces a uniform ladder
    /// step (the FXL option list); `None` uses the per-segment seeded step.
    fn rebook_classes(&self, segments: &[Segment], step: Option<u8>) -> Vec<char>;
}

/// The built-in deterministic simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimPricing;

impl PricingProvider for SimPricing {
    fn price(&self, request: &PricingRequest) -> Result<FareResult, ProviderError> {
        Ok(price_itinerary(request))
    }

    fn rebook_classes(&self, segments: &[Segment], step: Option<u8>) -> Vec<char> {
        segments
            .iter()
            .map(|seg| {
                let step = match step {
                    Some(step) => step as usize,
                    None => seeded_rebook_step(seg),
                };
                let idx = ladder_index(seg.booking_class);
                CLASS_LADDER[(idx + step).min(CLASS_LADDER.len() - 1)]
            })
            .collect()
    }
}

fn ladder_index(class: char) -> usize {
    CLASS_LADDER
        .iter()
        .position(|&c| c == class)
        .unwrap_or(CLASS_LADDER.len() - 1)
}

/// Class weight, strictly decreasing along the ladder.
pub fn class_multiplier(class: char) -> f64 {
    2.60 - 0.08 * ladder_index(class) as f64
}

fn sorted_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Simulated great-circle distance, symmetric in the pair.
pub fn route_distance(from: &str, to: &str) -> i64 {
    let (a, b) = sorted_pair(from, to);
    let mut rng = SeededRng::from_phrase(&format!("DIST:{}:{}", a, b));
    200 + rng.range(0, 8800)
}

fn zone(code: &str) -> i64 {
    code.bytes().map(i64::from).sum::<i64>() % 4
}

/// Per-segment base fare in euros (before passenger-type weighting). The
/// offset seed excludes the booking class so moving down the ladder can only
/// lower the fare.
fn segment_base(seg: &Segment) -> f64 {
    let (a, b) = sorted_pair(&seg.origin, &seg.destination);
    let mut rng = SeededRng::from_phrase(&format!(
        "FARE:{}:{}:{}:{}:{}",
        seg.carrier, seg.flight_no, seg.date_ddmmm, a, b
    ));
    let distance = route_distance(&seg.origin, &seg.destination) as f64;
    distance * RATE_PER_KM * class_multiplier(seg.booking_class) + rng.next_f64() * 40.0
}

fn seeded_rebook_step(seg: &Segment) -> usize {
    let mut rng = SeededRng::from_phrase(&format!("RBK:{}", seg.identity()));
    1 + rng.index(3)
}

/// Whether any two segments form a reversed origin/destination pair.
pub fn has_round_trip(segments: &[Segment]) -> bool {
    segments.iter().enumerate().any(|(i, a)| {
        segments[i + 1..]
            .iter()
            .any(|b| a.origin == b.destination && a.destination == b.origin)
    })
}

/// Deterministic fare basis code for one segment.
pub fn fare_basis(seg: &Segment) -> String {
    let mut rng = SeededRng::from_phrase(&format!(
        "FB:{}:{}:{}",
        seg.carrier, seg.flight_no, seg.date_ddmmm
    ));
    format!("{}{}{}", seg.booking_class, rng.range(10, 100), seg.carrier)
}

/// Deterministic fare-note lines for one fare basis code.
pub fn fare_note(basis: &str) -> Vec<String> {
    let mut rng = SeededRng::from_phrase(&format!("FQN:{}", basis));
    let penalty = ["NON REFUNDABLE", "CHANGE PENALTY EUR 50.00", "REFUND PENALTY EUR 90.00"]
        [rng.index(3)];
    let baggage = [15, 20, 23, 30][rng.index(4)];
    vec![
        format!("FARE BASIS {}", basis),
        format!("CAT 16 {}", penalty),
        format!("BAGGAGE ALLOWANCE {}K", baggage),
    ]
}

fn tax_lines(segments: &[Segment], bases: &[f64], mult: f64) -> Vec<TaxLine> {
    let mut fr = 0.0;
    let mut qx = 0.0;
    let mut yq = 0.0;
    let mut xt = 0.0;
    for (seg, base) in segments.iter().zip(bases) {
        let zo = zone(&seg.origin);
        let zd = zone(&seg.destination);
        fr += 4.50 + 1.10 * zo as f64;
        qx += 6.80 + 0.90 * zd as f64;
        yq += 0.06 * base;
        xt += 3.20 * ((zo + zd) % 3 + 1) as f64;
    }
    [("FR", fr), ("QX", qx), ("YQ", yq), ("XT", xt)]
        .into_iter()
        .map(|(code, amount)| TaxLine {
            code: code.to_string(),
            amount: to_cents(amount * mult),
        })
        .collect()
}

/// Price an itinerary for a passenger mix.
pub fn price_itinerary(request: &PricingRequest) -> FareResult {
    let segments = &request.segments;
    let bases: Vec<f64> = segments.iter().map(segment_base).collect();
    let surcharge = if has_round_trip(segments) {
        ROUND_TRIP_SURCHARGE
    } else {
        0.0
    };
    let itinerary_base: f64 = bases.iter().sum::<f64>() + surcharge;

    let mix: Vec<(PaxType, u32)> = if request.pax_mix.is_empty() {
        vec![(PaxType::Adt, 1)]
    } else {
        request.pax_mix.clone()
    };

    let pax_fares: Vec<PaxFare> = mix
        .into_iter()
        .map(|(pax_type, count)| {
            let mult = pax_type.fare_multiplier();
            let base = to_cents(itinerary_base * mult);
            let taxes = tax_lines(segments, &bases, mult);
            let total = base + taxes.iter().map(|t| t.amount).sum::<i64>();
            PaxFare {
                pax_type,
                count,
                base,
                taxes,
                total,
            }
        })
        .collect();

    let total = pax_fares
        .iter()
        .map(|fare| fare.total * fare.count as i64)
        .sum();

    FareResult {
        pax_fares,
        fare_basis: segments.iter().map(fare_basis).collect(),
        validating_carrier: segments
            .first()
            .map(|seg| seg.carrier.clone())
            .unwrap_or_else(|| "YY".to_string()),
        currency: "EUR".to_string(),
        total,
    }
}
