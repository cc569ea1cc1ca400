//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random number
//! generation. CRITICAL: all randomness in the simulator MUST go through
//! this module; the simulators derive a fresh generator from a seed phrase
//! built out of their business inputs so identical inputs always reproduce
//! identical outputs.

mod xorshift;

pub use xorshift::{Randomness, SeededRng};
