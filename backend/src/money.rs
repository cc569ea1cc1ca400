//! Money representation
//!
//! CRITICAL: all monetary amounts are i64 integer cents. Simulated fares are
//! computed in floating point and converted exactly once, with round-half-up
//! semantics, at each published figure (per-segment base, per-tax-code
//! amount, per-passenger total). Downstream arithmetic is integer only.

/// Round a euro amount half-up to cents.
///
/// Exact halves land on the upper cent; values off the boundary (which is
/// what the seeded fare formulas produce) round to the nearest cent.
///
/// # Example
/// ```
/// use pnr_simulator_core::money::to_cents;
///
/// assert_eq!(to_cents(10.006), 1001);
/// assert_eq!(to_cents(10.004), 1000);
/// ```
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0 + 0.5).floor() as i64
}

/// Format cents as a two-decimal amount, e.g. `215.30`.
pub fn fmt_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, (cents / 100).abs(), (cents % 100).abs())
}
