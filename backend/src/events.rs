//! Output event stream
//!
//! A command produces an ordered list of events. Each event is either a
//! `Print` (screen content) or an `Error` (terminal failure line). The kind
//! is decided purely by whether the text belongs to the fixed error
//! vocabulary, never by how the text was produced, so callers can filter the
//! stream deterministically.

use serde::{Deserialize, Serialize};

/// Fixed vocabulary of error texts. Everything else is screen content.
pub const KNOWN_ERRORS: [&str; 28] = [
    "INVALID FORMAT",
    "NO ACTIVE PNR",
    "NO ITINERARY",
    "NO AVAILABILITY",
    "NO SEATS",
    "NOT ENOUGH SEATS",
    "PNR NOT FOUND",
    "END PNR FIRST",
    "ELEMENT NOT FOUND",
    "NOT ALLOWED",
    "NOT ALLOWED - TST PRESENT",
    "NOT ALLOWED - TST SEGMENT",
    "NOT ALLOWED - LAST SEGMENT",
    "NOT ALLOWED - LAST ADT",
    "NOT ALLOWED - INF ASSOCIATED",
    "NOTHING TO CANCEL",
    "FUNCTION NOT APPLICABLE",
    "NO TST",
    "NO TICKET",
    "NO EMAIL ADDRESS",
    "TICKET ALREADY ISSUED",
    "NO SEGMENTS",
    "QUEUE NOT FOUND",
    "NO ACTIVE QUEUE",
    "NO RECORDED PNR",
    "NO FORM OF PAYMENT",
    "LOCATION PROVIDER NOT CONFIGURED",
    "HELP NOT FOUND",
];

/// Whether a text line belongs to the error vocabulary.
pub fn is_known_error(text: &str) -> bool {
    KNOWN_ERRORS.contains(&text)
}

/// Event kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Print,
    Error,
}

/// One line of command output.
///
/// # Example
/// ```
/// use pnr_simulator_core::events::{Event, EventKind};
///
/// assert_eq!(Event::classified("OK").kind, EventKind::Print);
/// assert_eq!(Event::classified("NO ACTIVE PNR").kind, EventKind::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub text: String,
}

impl Event {
    /// Build an event, deriving the kind from the vocabulary.
    pub fn classified(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if is_known_error(&text) {
            EventKind::Error
        } else {
            EventKind::Print
        };
        Self { kind, text }
    }
}

/// Ordered event accumulator threaded through one command execution.
#[derive(Debug, Default)]
pub struct EventSink {
    events: Vec<Event>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line, classifying it against the vocabulary.
    pub fn push(&mut self, text: impl Into<String>) {
        self.events.push(Event::classified(text));
    }

    /// Append many lines in order.
    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.push(line);
        }
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}
