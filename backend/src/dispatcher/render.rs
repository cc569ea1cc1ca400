//! Live-view rendering
//!
//! Walks the rebuilt element index and formats each element into its
//! fixed-width screen line. RT and the implicit redisplay after a mutating
//! command both come through here, so the numbered view can never drift
//! from what XE resolves numbers against.

use crate::models::element::{build_elements, ElementKind};
use crate::models::pnr::Pnr;
use crate::models::segment::Segment;
use crate::models::state::SessionState;
use crate::models::ticket::Ticket;
use crate::money::fmt_amount;

pub fn pad_left(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

pub fn pad_right(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// Fixed-width segment line, e.g. `PC 0751 Y 26DEC ALGPAR 0700 0925 HK1`.
pub fn segment_line(seg: &Segment) -> String {
    format!(
        "{} {:04} {} {} {} {:0>4} {:0>4} {}{}",
        pad_right(&seg.carrier, 2),
        seg.flight_no,
        seg.booking_class,
        pad_right(&seg.date_ddmmm, 5),
        pad_right(&format!("{}{}", seg.origin, seg.destination), 6),
        seg.dep_time,
        seg.arr_time,
        seg.status.code(),
        seg.pax_count
    )
}

fn ticket_fa_line(ticket: &Ticket) -> String {
    if ticket.is_void() {
        format!("FA {} VOID", ticket.number)
    } else {
        format!("FA {} ET", ticket.number)
    }
}

fn ticket_fb_line(state: &SessionState, ticket: &Ticket) -> String {
    match state.tsts.iter().find(|t| t.id == ticket.tst_id) {
        Some(tst) => format!(
            "FB TST{} {} {}",
            tst.id,
            tst.currency,
            fmt_amount(tst.total)
        ),
        None => format!("FB TST{}", ticket.tst_id),
    }
}

fn element_body(state: &SessionState, pnr: &Pnr, kind: ElementKind) -> String {
    match kind {
        ElementKind::Passenger(i) => pnr.passengers[i].display(),
        ElementKind::Segment(i) => segment_line(&pnr.itinerary[i]),
        ElementKind::Ssr(i) => format!("SSR {}", pnr.ssrs[i]),
        ElementKind::Osi(i) => format!("OSI {}", pnr.osis[i]),
        ElementKind::Remark(i) => format!("RM {}", pnr.remarks[i]),
        ElementKind::OptionElem(i) => pnr.options[i].display(),
        ElementKind::TicketTimeLimit => {
            format!("TKTL/{}", pnr.ticketing_time_limit.as_deref().unwrap_or(""))
        }
        ElementKind::FormOfPayment => {
            format!("FP {}", pnr.form_of_payment.as_deref().unwrap_or(""))
        }
        ElementKind::TicketFa(i) => ticket_fa_line(&pnr.tickets[i]),
        ElementKind::TicketFb(i) => ticket_fb_line(state, &pnr.tickets[i]),
        ElementKind::Receipt(i) => {
            let receipt = &pnr.receipts[i];
            format!(
                "ITR-EML {} {} {}",
                receipt.ticket_number,
                receipt.passenger_name,
                receipt.segments.join(" ")
            )
        }
        ElementKind::Contact(i) => pnr.contacts[i].clone(),
        ElementKind::Email(i) => format!("APE {}", pnr.emails[i]),
        ElementKind::Signature => format!("RF {}", pnr.signature.as_deref().unwrap_or("")),
        ElementKind::RecordLocator => {
            format!("REC LOC {}", pnr.record_locator.as_deref().unwrap_or(""))
        }
    }
}

/// Render the numbered live view plus the TST summary tail.
///
/// Passenger elements flow three to a line with continuous numbering; every
/// other element occupies one line prefixed by its right-aligned number.
pub fn live_view(state: &SessionState, year: i32) -> Vec<String> {
    let Some(pnr) = &state.active_pnr else {
        return vec!["NO ACTIVE PNR".to_string()];
    };

    let mut lines = Vec::new();
    let mut name_row: Vec<String> = Vec::new();

    for element in build_elements(pnr, year) {
        match element.kind {
            ElementKind::Passenger(_) => {
                name_row.push(format!(
                    "{}. {}",
                    element.number,
                    element_body(state, pnr, element.kind)
                ));
                if name_row.len() == 3 {
                    lines.push(name_row.join("  "));
                    name_row.clear();
                }
            }
            kind => {
                if !name_row.is_empty() {
                    lines.push(name_row.join("  "));
                    name_row.clear();
                }
                lines.push(format!(
                    "{} {}",
                    pad_left(&element.number.to_string(), 2),
                    element_body(state, pnr, kind)
                ));
            }
        }
    }
    if !name_row.is_empty() {
        lines.push(name_row.join("  "));
    }

    // Live transactions trail the numbered elements, outside the numbering.
    for tst in state.tsts.iter().filter(|t| t.is_live()) {
        lines.push(format!(
            "TST {} {} {} {} STATUS {}",
            tst.id,
            tst.currency,
            fmt_amount(tst.total),
            tst.mix_summary(),
            tst.status.label()
        ));
    }

    lines
}
