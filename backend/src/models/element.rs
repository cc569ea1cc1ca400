//! Element index
//!
//! The numbered view of a reservation. Rebuilt from scratch on every render
//! and before every numeric cancellation, it is the single source of truth
//! for element numbers: the screen and `XE` must never disagree about what
//! number 4 is.
//!
//! Rebuild cost is linear in the reservation size (one sort over the
//! segments), which keeps recompute-on-demand cheap enough to avoid any
//! incremental bookkeeping.

use crate::dates::parse_ddmmm;
use crate::models::pnr::Pnr;
use chrono::NaiveDate;

/// What an element points at inside the reservation.
///
/// Indices refer to the source list the variant names (e.g. `Segment(1)` is
/// `pnr.itinerary[1]`, whatever its display position after date sorting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Passenger(usize),
    Segment(usize),
    Ssr(usize),
    Osi(usize),
    Remark(usize),
    OptionElem(usize),
    TicketTimeLimit,
    FormOfPayment,
    /// FA line of the ticket at this index
    TicketFa(usize),
    /// FB linkage line of the ticket at this index
    TicketFb(usize),
    Receipt(usize),
    Contact(usize),
    Email(usize),
    Signature,
    RecordLocator,
}

/// One numbered entry of the rebuilt index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    /// 1-based display number
    pub number: usize,
    pub kind: ElementKind,
}

/// Itinerary indices in display order: by parsed travel date, ties broken by
/// sell order. Unparseable dates sort last.
pub fn display_segment_order(pnr: &Pnr, year: i32) -> Vec<usize> {
    let mut order: Vec<(usize, Option<NaiveDate>)> = pnr
        .itinerary
        .iter()
        .enumerate()
        .map(|(idx, seg)| (idx, parse_ddmmm(&seg.date_ddmmm, year)))
        .collect();
    order.sort_by(|a, b| match (a.1, b.1) {
        (Some(da), Some(db)) => da.cmp(&db).then(a.0.cmp(&b.0)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });
    order.into_iter().map(|(idx, _)| idx).collect()
}

/// Rebuild the full element list for a reservation.
///
/// Order: passengers, segments (date sorted), SSR, OSI, remarks, options,
/// ticketing time limit, form of payment, FA/FB pairs, receipts, contacts,
/// emails, signature, record locator.
pub fn build_elements(pnr: &Pnr, year: i32) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut number = 0usize;
    let mut push = |kind: ElementKind, elements: &mut Vec<Element>| {
        number += 1;
        elements.push(Element { number, kind });
    };

    for idx in 0..pnr.passengers.len() {
        push(ElementKind::Passenger(idx), &mut elements);
    }
    for idx in display_segment_order(pnr, year) {
        push(ElementKind::Segment(idx), &mut elements);
    }
    for idx in 0..pnr.ssrs.len() {
        push(ElementKind::Ssr(idx), &mut elements);
    }
    for idx in 0..pnr.osis.len() {
        push(ElementKind::Osi(idx), &mut elements);
    }
    for idx in 0..pnr.remarks.len() {
        push(ElementKind::Remark(idx), &mut elements);
    }
    for idx in 0..pnr.options.len() {
        push(ElementKind::OptionElem(idx), &mut elements);
    }
    if pnr.ticketing_time_limit.is_some() {
        push(ElementKind::TicketTimeLimit, &mut elements);
    }
    if pnr.form_of_payment.is_some() {
        push(ElementKind::FormOfPayment, &mut elements);
    }
    for idx in 0..pnr.tickets.len() {
        push(ElementKind::TicketFa(idx), &mut elements);
        push(ElementKind::TicketFb(idx), &mut elements);
    }
    for idx in 0..pnr.receipts.len() {
        push(ElementKind::Receipt(idx), &mut elements);
    }
    for idx in 0..pnr.contacts.len() {
        push(ElementKind::Contact(idx), &mut elements);
    }
    for idx in 0..pnr.emails.len() {
        push(ElementKind::Email(idx), &mut elements);
    }
    if pnr.signature.is_some() {
        push(ElementKind::Signature, &mut elements);
    }
    if pnr.record_locator.is_some() {
        push(ElementKind::RecordLocator, &mut elements);
    }

    elements
}
