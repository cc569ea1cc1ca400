//! Engine error vocabulary
//!
//! Every command failure surfaces as a single terminal error event whose
//! text is drawn from this fixed vocabulary. Callers filter events by
//! matching the text against the same set, so the strings here are part of
//! the wire contract and must never change casually.

use thiserror::Error;

/// Errors a command can terminate with.
///
/// The `Display` form of each variant is the exact screen text; the event
/// layer classifies text as an error by membership in this vocabulary (see
/// [`crate::events::is_known_error`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("INVALID FORMAT")]
    InvalidFormat,

    #[error("NO ACTIVE PNR")]
    NoActivePnr,

    #[error("NO ITINERARY")]
    NoItinerary,

    #[error("NO AVAILABILITY")]
    NoAvailability,

    #[error("NO SEATS")]
    NoSeats,

    #[error("NOT ENOUGH SEATS")]
    NotEnoughSeats,

    #[error("PNR NOT FOUND")]
    PnrNotFound,

    #[error("END PNR FIRST")]
    EndPnrFirst,

    #[error("ELEMENT NOT FOUND")]
    ElementNotFound,

    #[error("NOT ALLOWED")]
    NotAllowed,

    #[error("NOT ALLOWED - TST PRESENT")]
    TstPresent,

    #[error("NOT ALLOWED - TST SEGMENT")]
    TstSegment,

    #[error("NOT ALLOWED - LAST SEGMENT")]
    LastSegment,

    #[error("NOT ALLOWED - LAST ADT")]
    LastAdult,

    #[error("NOT ALLOWED - INF ASSOCIATED")]
    InfantAssociated,

    #[error("NOTHING TO CANCEL")]
    NothingToCancel,

    #[error("FUNCTION NOT APPLICABLE")]
    FunctionNotApplicable,

    #[error("NO TST")]
    NoTst,

    #[error("NO TICKET")]
    NoTicket,

    #[error("NO EMAIL ADDRESS")]
    NoEmailAddress,

    #[error("TICKET ALREADY ISSUED")]
    TicketAlreadyIssued,

    #[error("NO SEGMENTS")]
    NoSegments,

    #[error("QUEUE NOT FOUND")]
    QueueNotFound,

    #[error("NO ACTIVE QUEUE")]
    NoActiveQueue,

    #[error("NO RECORDED PNR")]
    NoRecordedPnr,

    #[error("NO FORM OF PAYMENT")]
    NoFormOfPayment,

    #[error("LOCATION PROVIDER NOT CONFIGURED")]
    LocationProviderNotConfigured,

    #[error("HELP NOT FOUND")]
    HelpNotFound,
}
