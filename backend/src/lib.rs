//! PNR Workstation Simulator - Core Engine
//!
//! Deterministic, text-driven simulation of an airline reservation
//! workstation: mnemonic commands go in, an ordered stream of print/error
//! events comes out, and the caller threads the session state between calls.
//!
//! # Architecture
//!
//! - **clock / rng / dates**: injectable time, phrase-seeded randomness,
//!   `ddMMM` date handling
//! - **models**: domain types (passengers, segments, PNR, TST, tickets, the
//!   element index, session state)
//! - **sim**: deterministic availability and pricing simulators behind
//!   provider traits
//! - **store / queues / locations**: committed snapshots, queue store, and
//!   the location lookup collaborator
//! - **dispatcher**: the command lexer, handlers, and live-view rendering
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. All randomness is deterministic (phrase-seeded xorshift64*)
//! 3. Identical command sequences against identical seams produce
//!    byte-identical event streams
//! 4. No module-level mutable state: the engine only touches the session
//!    state object it is handed

// Module declarations
pub mod clock;
pub mod dates;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod locations;
pub mod models;
pub mod money;
pub mod queues;
pub mod rng;
pub mod sim;
pub mod store;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use dispatcher::{process_command, Deps};
pub use error::EngineError;
pub use events::{Event, EventKind};
pub use locations::{InMemoryLocations, Location, Locations};
pub use models::{
    element::{build_elements, Element, ElementKind},
    passenger::{Passenger, PaxType},
    pnr::{Pnr, PnrStatus},
    segment::{Segment, SegmentStatus},
    state::SessionState,
    ticket::{Receipt, Ticket, TicketStatus},
    tst::{Tst, TstStatus},
};
pub use queues::QueueStore;
pub use rng::{Randomness, SeededRng};
pub use sim::availability::{AvailabilityProvider, AvailabilityQuery, Flight, SimAvailability};
pub use sim::pricing::{PriceMode, PricingProvider, SimPricing};
pub use store::Snapshot;
