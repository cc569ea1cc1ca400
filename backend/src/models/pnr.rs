//! The reservation record (PNR)
//!
//! Holds everything a workstation session builds up before committing:
//! names, itinerary, contacts, service elements, ticketing data. A committed
//! reservation (one with a record locator) can keep mutating; uncommitted
//! changes stay visible until the next commit or revert.

use crate::models::passenger::{Passenger, PaxType};
use crate::models::segment::Segment;
use crate::models::ticket::{Receipt, Ticket};
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PnrStatus {
    Active,
    Recorded,
}

/// An `OP` option reminder element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionElement {
    /// Reminder date in `ddMMM` form, when given
    pub date_ddmmm: Option<String>,
    pub text: String,
}

impl OptionElement {
    pub fn display(&self) -> String {
        match &self.date_ddmmm {
            Some(date) => format!("OP {} {}", date, self.text),
            None => format!("OP {}", self.text),
        }
    }
}

/// The reservation record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pnr {
    pub passengers: Vec<Passenger>,

    /// Segments in sell order; display order is recomputed by the element
    /// index (travel date, ties by insertion).
    pub itinerary: Vec<Segment>,

    /// Raw `AP...` contact lines
    pub contacts: Vec<String>,

    /// Email addresses from `APE-`
    pub emails: Vec<String>,

    /// SSR texts, stored without the `SSR ` keyword
    pub ssrs: Vec<String>,

    /// OSI texts, stored without the `OSI ` keyword
    pub osis: Vec<String>,

    /// Free-text remarks
    pub remarks: Vec<String>,

    pub options: Vec<OptionElement>,

    /// Ticketing time limit date (`ddMMM`)
    pub ticketing_time_limit: Option<String>,

    pub form_of_payment: Option<String>,

    /// Signature element (`RF`)
    pub signature: Option<String>,

    pub tickets: Vec<Ticket>,

    pub receipts: Vec<Receipt>,

    pub record_locator: Option<String>,

    pub status: PnrStatus,

    /// Set by XI; the next commit cancels the record instead of saving it
    pub pending_cancellation: bool,
}

impl Default for PnrStatus {
    fn default() -> Self {
        PnrStatus::Active
    }
}

impl Pnr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adult_count(&self) -> usize {
        self.passengers
            .iter()
            .filter(|p| p.pax_type == PaxType::Adt)
            .count()
    }

    /// Whether any infant is linked to the passenger at `index`.
    pub fn has_linked_infant(&self, index: usize) -> bool {
        self.passengers
            .iter()
            .any(|p| p.pax_type == PaxType::Inf && p.linked_adult == Some(index))
    }

    /// Index of the first adult without a linked infant, used when an infant
    /// entry is added.
    pub fn free_adult_index(&self) -> Option<usize> {
        (0..self.passengers.len()).find(|&i| {
            self.passengers[i].pax_type == PaxType::Adt && !self.has_linked_infant(i)
        })
    }

    pub fn active_segments(&self) -> impl Iterator<Item = &Segment> {
        self.itinerary.iter().filter(|s| s.is_active())
    }

    pub fn active_segment_count(&self) -> usize {
        self.active_segments().count()
    }

    /// Latest non-void ticket, if any.
    pub fn last_live_ticket(&self) -> Option<&Ticket> {
        self.tickets.iter().rev().find(|t| !t.is_void())
    }

    /// Remove the passenger at `index`, keeping infant links consistent.
    ///
    /// Eligibility (last adult, linked infant, live TST) is the caller's
    /// responsibility; this only maintains the index invariant.
    pub fn remove_passenger(&mut self, index: usize) {
        self.passengers.remove(index);
        for p in &mut self.passengers {
            if let Some(linked) = p.linked_adult {
                if linked > index {
                    p.linked_adult = Some(linked - 1);
                } else if linked == index {
                    p.linked_adult = None;
                }
            }
        }
    }

    /// Strip all mutable content for a pending cancellation (XI). The record
    /// locator survives so the confirming commit can find the snapshot.
    pub fn clear_for_cancellation(&mut self) {
        let record_locator = self.record_locator.take();
        *self = Pnr {
            record_locator,
            pending_cancellation: true,
            ..Pnr::default()
        };
    }

    /// Content fingerprint feeding the record-locator derivation: passenger
    /// identities, segment identities, contacts, signature.
    pub fn content_fingerprint(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.passengers.iter().map(Passenger::identity));
        parts.extend(self.itinerary.iter().map(Segment::identity));
        parts.extend(self.contacts.iter().cloned());
        if let Some(signature) = &self.signature {
            parts.push(signature.clone());
        }
        parts.join("|")
    }
}
