//! Ticket and itinerary-receipt models
//!
//! Ticket numbers come from a global sequence rendered into a fixed-width
//! `172-NNNNNNNNNN` document number. A transaction carries at most one
//! non-void ticket at a time; voiding the last ticket of a transaction voids
//! the transaction too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock prefix for simulated ticket numbers.
pub const TICKET_STOCK_PREFIX: &str = "172";

/// Render a global sequence number into the document-number form.
pub fn format_ticket_number(sequence: u64) -> String {
    format!("{}-{:010}", TICKET_STOCK_PREFIX, sequence)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Issued,
    Void,
}

/// An issued (possibly voided) electronic ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Fixed-width document number, e.g. `172-0000000001`
    pub number: String,

    /// Id of the transaction this ticket was issued against
    pub tst_id: u32,

    pub status: TicketStatus,

    pub issued_at: DateTime<Utc>,

    pub voided_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn is_void(&self) -> bool {
        self.status == TicketStatus::Void
    }
}

/// An itinerary receipt emitted by ITR-EML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Document number of the referenced (non-void) ticket
    pub ticket_number: String,

    /// Primary passenger display name
    pub passenger_name: String,

    /// Email address the receipt was sent to
    pub email: String,

    /// `ORGDST ddMMM` strings for the active segments
    pub segments: Vec<String>,
}
