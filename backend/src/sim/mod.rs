//! Deterministic simulators
//!
//! Availability and pricing are simulated, not looked up: every figure is
//! derived from a phrase-seeded generator over the business inputs, so the
//! same route, date, passenger mix and pricing mode always reproduce the
//! same screens. Both simulators sit behind provider traits that callers
//! can override.

pub mod availability;
pub mod pricing;

use thiserror::Error;

/// Failures inside an availability or pricing provider. The command layer
/// downgrades these to a generic format error.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("availability provider failed: {0}")]
    Availability(String),

    #[error("pricing provider failed: {0}")]
    Pricing(String),
}
