//! Record store - committed reservation snapshots
//!
//! A commit captures an immutable deep copy of the reservation and its
//! priced transactions, keyed by record locator. Revert (IG) and retrieve
//! (IR) hand back fresh clones, so later mutations never reach the stored
//! copy.
//!
//! # Critical Invariants
//!
//! - **Determinism**: locators are content-derived, never random; the same
//!   reservation content always maps to the same locator
//! - **Isolation**: restore returns clones; a snapshot is never aliased by
//!   the working state
//! - **Deep equality**: capture followed by restore yields a value equal to
//!   the captured one (`PartialEq` on the whole tree)

use crate::models::pnr::Pnr;
use crate::models::tst::Tst;
use crate::rng::SeededRng;
use serde::{Deserialize, Serialize};

/// Alphabet for record locators. I and O are excluded to keep hand-typed
/// locators unambiguous.
const LOCATOR_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Length of a record locator.
pub const LOCATOR_LEN: usize = 6;

/// Immutable-at-capture copy of a committed reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pnr: Pnr,
    pub tsts: Vec<Tst>,
}

impl Snapshot {
    /// Capture the current reservation and transactions.
    pub fn capture(pnr: &Pnr, tsts: &[Tst]) -> Self {
        Self {
            pnr: pnr.clone(),
            tsts: tsts.to_vec(),
        }
    }

    /// Hand back fresh clones of the stored content.
    pub fn restore(&self) -> (Pnr, Vec<Tst>) {
        (self.pnr.clone(), self.tsts.clone())
    }
}

/// Derive the record locator for a reservation's content fingerprint.
///
/// The fingerprint (passenger identities, segment identities, contacts,
/// signature) seeds the deterministic generator; six draws over the locator
/// alphabet produce the identifier. Identical content ⇒ identical locator,
/// and re-committing an unchanged reservation keeps its locator.
///
/// # Example
/// ```
/// use pnr_simulator_core::store::derive_locator;
///
/// let a = derive_locator("DOE/JOHN:ADT|AP123456|TEST");
/// let b = derive_locator("DOE/JOHN:ADT|AP123456|TEST");
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 6);
/// ```
pub fn derive_locator(fingerprint: &str) -> String {
    let mut rng = SeededRng::from_phrase(&format!("RECLOC:{}", fingerprint));
    (0..LOCATOR_LEN)
        .map(|_| LOCATOR_CHARS[rng.index(LOCATOR_CHARS.len())] as char)
        .collect()
}

/// Whether a string is shaped like a record locator.
pub fn is_locator_shaped(text: &str) -> bool {
    text.len() == LOCATOR_LEN && text.bytes().all(|b| b.is_ascii_uppercase())
}
