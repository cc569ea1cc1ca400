//! Session state
//!
//! The complete state of one workstation session. The caller owns this
//! object and threads it through every `process_command` call; the engine
//! reads and mutates only what it is handed; no module-level state exists.
//!
//! # Critical Invariants
//!
//! 1. Fully serializable: no live handles, deterministic map ordering
//! 2. At most one live (non-void) TST at a time
//! 3. Ticket and TST counters only ever grow
//! 4. Committed snapshots are immutable once stored

use crate::models::pnr::Pnr;
use crate::models::tst::Tst;
use crate::queues::QueueStore;
use crate::sim::availability::AvailabilitySearch;
use crate::store::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything one session carries between commands.
///
/// # Example
///
/// ```
/// use pnr_simulator_core::SessionState;
///
/// let state = SessionState::new();
/// assert!(state.active_pnr.is_none());
/// let json = serde_json::to_string(&state).unwrap();
/// let restored: SessionState = serde_json::from_str(&json).unwrap();
/// assert_eq!(restored, state);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The working reservation, lazily created by the first mutating command
    pub active_pnr: Option<Pnr>,

    /// Result of the last availability search, consumed by SS
    pub last_availability: Option<AvailabilitySearch>,

    /// Priced transactions; at most one is live at a time
    pub tsts: Vec<Tst>,

    /// Next TST identifier (1-based)
    pub next_tst_id: u32,

    /// Next global ticket sequence number (1-based)
    pub next_ticket_seq: u64,

    /// Committed snapshots keyed by record locator
    pub record_store: BTreeMap<String, Snapshot>,

    /// Locator of the most recent commit
    pub last_committed: Option<String>,

    pub queues: QueueStore,

    /// Queue opened by QE, consumed by QN
    pub active_queue: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            next_tst_id: 1,
            next_ticket_seq: 1,
            ..Self::default()
        }
    }

    /// The live (non-void) transaction, if any.
    pub fn live_tst(&self) -> Option<&Tst> {
        self.tsts.iter().rev().find(|t| t.is_live())
    }

    pub fn live_tst_mut(&mut self) -> Option<&mut Tst> {
        self.tsts.iter_mut().rev().find(|t| t.is_live())
    }

    /// Reservation accessor that lazily creates the record, the way the
    /// first NM/AP/SS of a session does.
    pub fn ensure_pnr(&mut self) -> &mut Pnr {
        self.active_pnr.get_or_insert_with(Pnr::new)
    }

    /// Locator usable by queue placement: the active reservation's, falling
    /// back to the last committed one.
    pub fn resolvable_locator(&self) -> Option<&str> {
        self.active_pnr
            .as_ref()
            .and_then(|pnr| pnr.record_locator.as_deref())
            .or(self.last_committed.as_deref())
    }
}
