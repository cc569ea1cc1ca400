//! Command dispatcher
//!
//! The single entry point of the engine. One raw command line goes in
//! together with the session state and the dependency seams; an ordered
//! event list comes out. The lexer produces a closed command variant, the
//! matching handler validates first and mutates second, and every failure
//! surfaces as exactly one terminal error event.

pub mod command;
pub mod render;

use crate::clock::{Clock, SystemClock};
use crate::dates::{dow2, format_ddmmm, jd_banner};
use crate::error::EngineError;
use crate::events::{Event, EventSink};
use crate::locations::Locations;
use crate::models::element::{build_elements, Element, ElementKind};
use crate::models::passenger::{Passenger, PaxType};
use crate::models::pnr::{OptionElement, PnrStatus};
use crate::models::segment::{Segment, SegmentStatus};
use crate::models::state::SessionState;
use crate::models::ticket::{format_ticket_number, Ticket, TicketStatus};
use crate::models::tst::{Tst, TstStatus};
use crate::money::fmt_amount;
use crate::sim::availability::{AvailabilityProvider, AvailabilityQuery, AvailabilitySearch, Flight, SimAvailability};
use crate::sim::pricing::{fare_note, FareResult, PriceMode, PricingProvider, PricingRequest, SimPricing};
use crate::store::{derive_locator, Snapshot};
use crate::queues::QUEUE_PAGE_SIZE;
use chrono::Datelike;
use command::{CancelTarget, Command};
use render::{live_view, pad_left, pad_right, segment_line};
use std::collections::BTreeSet;
use tracing::debug;

/// Timetable/schedule rows per page.
const TIMETABLE_PAGE_SIZE: usize = 8;

/// Class tokens per availability display line.
const CLASS_TOKENS_PER_LINE: usize = 8;

static SIM_CLOCK: SystemClock = SystemClock;
static SIM_AVAILABILITY: SimAvailability = SimAvailability;
static SIM_PRICING: SimPricing = SimPricing;

/// Dependency seams for one command execution.
///
/// The defaults are the simulation-safe implementations; tests pin the clock
/// and demos plug in a location dataset:
///
/// ```
/// use pnr_simulator_core::{Deps, FixedClock, SessionState, process_command};
///
/// let clock = FixedClock::at_ymd(2030, 12, 1);
/// let deps = Deps::with_clock(&clock);
/// let mut state = SessionState::new();
/// let events = process_command(&mut state, "JD", &deps);
/// assert_eq!(events[0].text, "SUN DEC 01 2030");
/// ```
pub struct Deps<'a> {
    pub clock: &'a dyn Clock,
    pub availability: &'a dyn AvailabilityProvider,
    pub pricing: &'a dyn PricingProvider,
    /// No default: decode/search report a configuration error when absent
    pub locations: Option<&'a dyn Locations>,
}

impl Deps<'static> {
    pub fn simulation() -> Self {
        Self {
            clock: &SIM_CLOCK,
            availability: &SIM_AVAILABILITY,
            pricing: &SIM_PRICING,
            locations: None,
        }
    }
}

impl<'a> Deps<'a> {
    /// Simulation defaults with a caller-pinned clock.
    pub fn with_clock(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            availability: &SIM_AVAILABILITY,
            pricing: &SIM_PRICING,
            locations: None,
        }
    }
}

impl Default for Deps<'static> {
    fn default() -> Self {
        Self::simulation()
    }
}

/// Process one command line against the session state.
///
/// Empty input produces no events. Unknown or malformed input produces a
/// single `INVALID FORMAT` error event. State is only mutated by handlers
/// that passed all of their validation.
pub fn process_command(state: &mut SessionState, input: &str, deps: &Deps) -> Vec<Event> {
    let line = input.trim().to_uppercase();
    if line.is_empty() {
        return Vec::new();
    }
    debug!(command = %line, "dispatching");

    let year = deps.clock.today().year();
    let outcome = command::parse(&line, year).and_then(|cmd| dispatch(state, deps, cmd, year));

    let mut sink = EventSink::new();
    match outcome {
        Ok(lines) => sink.extend(lines),
        Err(err) => sink.push(err.to_string()),
    }
    sink.into_events()
}

fn dispatch(
    state: &mut SessionState,
    deps: &Deps,
    cmd: Command,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    match cmd {
        Command::HelpAll => Ok(help_all()),
        Command::HelpTopic(topic) => help_topic(&topic),
        Command::DateBanner => Ok(vec![jd_banner(deps.clock.today())]),
        Command::AvailabilityBare => Ok(vec![
            "AMADEUS SELLING PLATFORM".to_string(),
            "TRAINING MODE".to_string(),
        ]),
        Command::Availability { date, from, to, carrier } => {
            handle_availability(state, deps, date, from, to, carrier)
        }
        Command::Timetable { date, from, to } => handle_timetable(deps, date, from, to),
        Command::Schedule { date, from, to } => handle_schedule(deps, date, from, to),
        Command::Sell { line, class, pax } => handle_sell(state, line, class, pax, year),
        Command::Cancel(target) => handle_cancel(state, target, year),
        Command::NameAdults(entries) => {
            let pnr = state.ensure_pnr();
            for entry in entries {
                pnr.passengers.push(Passenger::adult(
                    &entry.last,
                    &entry.first,
                    entry.title.as_deref(),
                ));
            }
            Ok(live_view(state, year))
        }
        Command::NameChild { last, first, age } => {
            state
                .ensure_pnr()
                .passengers
                .push(Passenger::child(&last, &first, age));
            Ok(live_view(state, year))
        }
        Command::NameInfant { last, first } => {
            let pnr = state.ensure_pnr();
            let link = pnr.free_adult_index();
            pnr.passengers.push(Passenger::infant(&last, &first, link));
            Ok(live_view(state, year))
        }
        Command::Contact(text) => {
            state.ensure_pnr().contacts.push(text);
            Ok(live_view(state, year))
        }
        Command::Email(email) => {
            state.ensure_pnr().emails.push(email);
            Ok(live_view(state, year))
        }
        Command::Signature(text) => {
            state.ensure_pnr().signature = Some(text);
            Ok(live_view(state, year))
        }
        Command::Remark(text) => {
            state.ensure_pnr().remarks.push(text);
            Ok(live_view(state, year))
        }
        Command::Osi { carrier, text } => {
            state
                .ensure_pnr()
                .osis
                .push(format!("{} {}", carrier, text));
            Ok(live_view(state, year))
        }
        Command::Ssr { code, carrier, text } => {
            state
                .ensure_pnr()
                .ssrs
                .push(format!("{} {} {}", code, carrier, text));
            Ok(live_view(state, year))
        }
        Command::OptionReminder { date, text } => {
            state.ensure_pnr().options.push(OptionElement {
                date_ddmmm: date,
                text,
            });
            Ok(live_view(state, year))
        }
        Command::TicketTimeLimit(date) => {
            state.ensure_pnr().ticketing_time_limit = Some(date);
            Ok(live_view(state, year))
        }
        Command::FormOfPayment(text) => handle_form_of_payment(state, text, year),
        Command::Commit => handle_commit(state, year),
        Command::Display => {
            if state.active_pnr.is_none() {
                return Err(EngineError::NoActivePnr);
            }
            Ok(live_view(state, year))
        }
        Command::Ignore => handle_restore(state, None, year, true),
        Command::Retrieve(locator) => handle_restore(state, locator, year, false),
        Command::CancelPnr => handle_cancel_pnr(state),
        Command::QueuePlace(name) => handle_queue_place(state, &name),
        Command::QueueDisplay(name) => handle_queue_display(state, &name),
        Command::QueueEnter(name) => handle_queue_enter(state, &name),
        Command::QueueNext => handle_queue_next(state, year),
        Command::QueueLeave => handle_queue_leave(state),
        Command::QueueSummary => handle_queue_summary(state),
        Command::Price(mode) => handle_price(state, deps, mode, year),
        Command::PriceOptions { detailed } => handle_price_options(state, deps, detailed, year),
        Command::TstDisplay(id) => handle_tst_display(state, id),
        Command::FareNotes(index) => handle_fare_notes(state, index),
        Command::TicketIssue => handle_ticket_issue(state, deps, year),
        Command::TicketVoid(number) => handle_ticket_void(state, deps, number, year),
        Command::ReceiptEmail => handle_receipt(state, year),
        Command::Decode(code) => {
            let locations = deps
                .locations
                .ok_or(EngineError::LocationProviderNotConfigured)?;
            locations
                .decode_iata(&code)
                .map_err(|_| EngineError::InvalidFormat)
        }
        Command::Search(text) => {
            let locations = deps
                .locations
                .ok_or(EngineError::LocationProviderNotConfigured)?;
            locations
                .search_by_text(&text)
                .map_err(|_| EngineError::InvalidFormat)
        }
    }
}

// ============================================================================
// Help
// ============================================================================

fn help_all() -> Vec<String> {
    [
        "AVAILABLE COMMANDS",
        "ANddMMMXXXYYY       AVAILABILITY (ex: AN26DECALGPAR)",
        "ANXXXYYY/ddMMM      AVAILABILITY (ex: ANALGPAR/26DEC)",
        "TN / SN             TIMETABLE / SCHEDULE",
        "SSnCn[pax]          SELL (ex: SS1Y1 / SS2M2 / SS1Y)",
        "XE1 / XE1-3 / XEALL CANCEL ELEMENTS",
        "NM                  NAME (MR/MRS optional, CHD/INF)",
        "AP / APE-           CONTACT / EMAIL",
        "RM / OSI / SSR      REMARKS AND SERVICE ELEMENTS",
        "OP / TKTL / FP      OPTION / TIME LIMIT / PAYMENT",
        "RF                  SIGNATURE (RFMM)",
        "ER                  END PNR",
        "RT                  DISPLAY PNR (same as live)",
        "IG / IR / XI        IGNORE / RETRIEVE / CANCEL PNR",
        "QP / QD / QE / QN   QUEUES",
        "FXP/FXX/FXR/FXB     PRICING",
        "FXL / TQT / FQN     PRICING DISPLAYS",
        "ET / TTP            TICKET ISSUE",
        "VOID / ITR-EML      VOID TICKET / SEND RECEIPT",
        "DAC XXX             DECODE IATA (ex: DAC ALG)",
        "DAN <TEXT>          ENCODE SEARCH (ex: DAN PARIS)",
        "JD                  DATE",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn help_topic(topic: &str) -> Result<Vec<String>, EngineError> {
    let lines: &[&str] = match topic {
        "AN" => &[
            "ANddMMMXXXYYY       AVAILABILITY (ex: AN26DECALGPAR)",
            "ANXXXYYY/ddMMM      AVAILABILITY (ex: ANALGPAR/26DEC)",
            "ANXXXYYY/ddMMM/CC   FILTER BY CARRIER",
        ],
        "TN" | "SN" => &[
            "TNddMMMXXXYYY       TIMETABLE",
            "SNddMMMXXXYYY       SCHEDULE",
        ],
        "SS" => &["SSnCn[pax]          SELL FROM LAST AVAILABILITY (ex: SS1Y1)"],
        "XE" => &[
            "XEn                 CANCEL ELEMENT n",
            "XEn-m               CANCEL ELEMENT RANGE",
            "XEALL               CANCEL ALL CANCELLABLE ELEMENTS",
        ],
        "NM" => &[
            "NM1LAST/FIRST MR    ADULT NAME",
            "NM1LAST/FIRST (CHD/7)  CHILD",
            "NM1LAST/FIRST (INF) INFANT",
        ],
        "AP" | "APE" => &[
            "AP<digits>          PHONE CONTACT",
            "APE-<address>       EMAIL CONTACT",
        ],
        "RF" => &["RF<text>            SIGNATURE (ex: RFMM)"],
        "RM" => &["RM <text>           REMARK"],
        "OSI" => &["OSI CC <text>       OTHER SERVICE INFORMATION"],
        "SSR" => &["SSR CODE CC <text>  SPECIAL SERVICE REQUEST"],
        "OP" => &["OPddMMM/<text>      OPTION REMINDER"],
        "TKTL" => &["TKTLddMMM           TICKETING TIME LIMIT"],
        "FP" => &["FP CASH / FP CC...  FORM OF PAYMENT"],
        "ER" => &["ER                  END TRANSACTION, ASSIGNS RECORD LOCATOR"],
        "RT" => &["RT                  DISPLAY PNR"],
        "IG" => &["IG                  IGNORE CHANGES, BACK TO LAST COMMIT"],
        "IR" => &["IR[ XXXXXX]         RETRIEVE BY RECORD LOCATOR"],
        "XI" => &["XI                  CANCEL PNR, CONFIRM WITH ER"],
        "QP" | "QD" | "QE" | "QN" | "QR" | "QS" => &[
            "QP/<queue>          PLACE ON QUEUE",
            "QD/<queue>          DISPLAY QUEUE",
            "QE/<queue>          ENTER QUEUE MODE",
            "QN                  NEXT PNR FROM QUEUE",
            "QR                  LEAVE QUEUE MODE",
            "QS                  QUEUE SUMMARY",
        ],
        "FXP" | "FXX" | "FXR" | "FXB" => &[
            "FXP                 PRICE AND STORE TST",
            "FXX                 REBOOK CHEAPER AND UPDATE TST",
            "FXR                 QUOTE REBOOKED FARE, NO CHANGE",
            "FXB                 BEST BUY: REBOOK AND STORE",
        ],
        "FXL" => &["FXL[n]              LIST REBOOKING OPTIONS"],
        "TQT" => &["TQT[n]              DISPLAY TST"],
        "FQN" => &["FQN[n]              FARE NOTES"],
        "ET" | "TTP" => &["ET / TTP            ISSUE TICKET"],
        "VOID" => &["VOID[ <number>]     VOID TICKET"],
        "ITR" | "ITR-EML" => &["ITR-EML             EMAIL ITINERARY RECEIPT"],
        "DAC" => &["DAC XXX             DECODE IATA CODE"],
        "DAN" => &["DAN <text>          SEARCH LOCATIONS"],
        "JD" => &["JD                  DISPLAY DATE"],
        _ => return Err(EngineError::HelpNotFound),
    };
    Ok(lines.iter().map(|l| l.to_string()).collect())
}

// ============================================================================
// Availability / timetable / schedule
// ============================================================================

fn class_tokens(flight: &Flight) -> Vec<String> {
    flight
        .classes
        .iter()
        .map(|c| format!("{}{}", c.code, c.seats))
        .collect()
}

fn availability_rows(flights: &[Flight]) -> Vec<String> {
    let mut rows = Vec::new();
    for flight in flights {
        let tokens = class_tokens(flight);
        let mut chunks = tokens.chunks(CLASS_TOKENS_PER_LINE);
        let head = chunks.next().map(|c| c.join(" ")).unwrap_or_default();
        rows.push(format!(
            "{}  {} {:04}  {} /{} {}",
            flight.line_no,
            pad_right(&flight.carrier, 2),
            flight.flight_no,
            pad_right(&head, 34),
            flight.from,
            flight.to
        ));
        for chunk in chunks {
            rows.push(format!("     {}", chunk.join(" ")));
        }
    }
    rows
}

fn handle_availability(
    state: &mut SessionState,
    deps: &Deps,
    date: chrono::NaiveDate,
    from: String,
    to: String,
    carrier: Option<String>,
) -> Result<Vec<String>, EngineError> {
    let query = AvailabilityQuery {
        from,
        to,
        date_ddmmm: format_ddmmm(date),
        dow: dow2(date).to_string(),
    };
    let mut flights = deps
        .availability
        .search(&query)
        .map_err(|_| EngineError::InvalidFormat)?;

    if let Some(code) = carrier {
        flights.retain(|f| f.carrier == code);
        if flights.is_empty() {
            return Err(EngineError::NoAvailability);
        }
        for (i, flight) in flights.iter_mut().enumerate() {
            flight.line_no = (i + 1) as u32;
        }
    }

    let mut lines = vec![
        format!("AN{}{}{}", query.date_ddmmm, query.from, query.to),
        format!("** AMADEUS AVAILABILITY - AN ** {}", query.to),
    ];
    lines.extend(availability_rows(&flights));

    debug!(flights = flights.len(), "availability search stored");
    state.last_availability = Some(AvailabilitySearch { query, flights });
    Ok(lines)
}

fn handle_timetable(
    deps: &Deps,
    date: chrono::NaiveDate,
    from: String,
    to: String,
) -> Result<Vec<String>, EngineError> {
    let query = AvailabilityQuery {
        from,
        to,
        date_ddmmm: format_ddmmm(date),
        dow: dow2(date).to_string(),
    };
    let flights = deps
        .availability
        .search(&query)
        .map_err(|_| EngineError::InvalidFormat)?;

    let mut lines = vec![
        format!("TN{}{}{}", query.date_ddmmm, query.from, query.to),
        format!("** AMADEUS TIMETABLE - TN ** {}", query.to),
    ];
    let pages = flights.len().div_ceil(TIMETABLE_PAGE_SIZE).max(1);
    for (page, chunk) in flights.chunks(TIMETABLE_PAGE_SIZE).enumerate() {
        lines.push(format!("PAGE {}/{}", page + 1, pages));
        for flight in chunk {
            lines.push(format!(
                "{}  {} {:04} {}{} {} {}  {}",
                flight.line_no,
                pad_right(&flight.carrier, 2),
                flight.flight_no,
                flight.from,
                flight.to,
                flight.dep_time,
                flight.arr_time,
                flight.op_days
            ));
        }
    }
    Ok(lines)
}

fn handle_schedule(
    deps: &Deps,
    date: chrono::NaiveDate,
    from: String,
    to: String,
) -> Result<Vec<String>, EngineError> {
    let query = AvailabilityQuery {
        from,
        to,
        date_ddmmm: format_ddmmm(date),
        dow: dow2(date).to_string(),
    };
    let flights = deps
        .availability
        .search(&query)
        .map_err(|_| EngineError::InvalidFormat)?;

    let mut lines = vec![
        format!("SN{}{}{}", query.date_ddmmm, query.from, query.to),
        format!("** AMADEUS SCHEDULE - SN ** {}", query.to),
    ];
    for flight in &flights {
        let letters: Vec<String> = flight.classes.iter().map(|c| c.code.to_string()).collect();
        let head = letters[..letters.len().min(11)].join(" ");
        lines.push(format!(
            "{}  {} {:04}  {} /{} {}",
            flight.line_no,
            pad_right(&flight.carrier, 2),
            flight.flight_no,
            pad_right(&head, 34),
            flight.from,
            flight.to
        ));
        if letters.len() > 11 {
            lines.push(format!("     {}", letters[11..].join(" ")));
        }
    }
    Ok(lines)
}

// ============================================================================
// Sell
// ============================================================================

fn handle_sell(
    state: &mut SessionState,
    line: u32,
    class: char,
    pax: u32,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    let search = state
        .last_availability
        .as_ref()
        .filter(|s| !s.flights.is_empty())
        .ok_or(EngineError::NoAvailability)?;
    let flight = search
        .flights
        .iter()
        .find(|f| f.line_no == line)
        .ok_or(EngineError::InvalidFormat)?;
    let avail = flight.class(class).ok_or(EngineError::InvalidFormat)?;
    if avail.seats == 0 {
        return Err(EngineError::NoSeats);
    }
    if pax as u8 > avail.seats {
        return Err(EngineError::NotEnoughSeats);
    }

    let segment = Segment {
        carrier: flight.carrier.clone(),
        flight_no: flight.flight_no,
        booking_class: class,
        date_ddmmm: flight.date_ddmmm.clone(),
        origin: flight.from.clone(),
        destination: flight.to.clone(),
        dep_time: flight.dep_time.clone(),
        arr_time: flight.arr_time.clone(),
        status: SegmentStatus::Hk,
        pax_count: pax,
    };
    state.ensure_pnr().itinerary.push(segment);

    let mut lines = vec!["OK".to_string()];
    lines.extend(live_view(state, year));
    Ok(lines)
}

// ============================================================================
// Cancellation
// ============================================================================

fn cancellable_by_xeall(pnr: &crate::models::pnr::Pnr, kind: ElementKind) -> bool {
    match kind {
        ElementKind::Segment(i) => pnr.itinerary[i].is_active(),
        ElementKind::Ssr(_)
        | ElementKind::Osi(_)
        | ElementKind::Remark(_)
        | ElementKind::OptionElem(_)
        | ElementKind::Contact(_)
        | ElementKind::Email(_)
        | ElementKind::TicketTimeLimit
        | ElementKind::FormOfPayment => true,
        _ => false,
    }
}

fn handle_cancel(
    state: &mut SessionState,
    target: CancelTarget,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    let pnr = state.active_pnr.as_ref().ok_or(EngineError::NoActivePnr)?;
    let elements = build_elements(pnr, year);
    if elements.is_empty() {
        return Err(EngineError::NoSegments);
    }

    let targets: Vec<Element> = match target {
        CancelTarget::One(n) => {
            vec![*elements.get(n - 1).ok_or(EngineError::ElementNotFound)?]
        }
        CancelTarget::Range(a, b) => {
            if b > elements.len() {
                return Err(EngineError::ElementNotFound);
            }
            elements[a - 1..b].to_vec()
        }
        CancelTarget::All => elements
            .iter()
            .copied()
            .filter(|e| cancellable_by_xeall(pnr, e.kind))
            .collect(),
    };

    // Bucket the targets per source list.
    let mut seg_targets: Vec<(usize, usize)> = Vec::new(); // (element number, itinerary idx)
    let mut pax_targets: Vec<usize> = Vec::new();
    let mut ssr_targets: Vec<usize> = Vec::new();
    let mut osi_targets: Vec<usize> = Vec::new();
    let mut remark_targets: Vec<usize> = Vec::new();
    let mut option_targets: Vec<usize> = Vec::new();
    let mut contact_targets: Vec<usize> = Vec::new();
    let mut email_targets: Vec<usize> = Vec::new();
    let mut clear_tktl = false;
    let mut clear_fp = false;
    let mut clear_signature = false;
    for element in &targets {
        match element.kind {
            ElementKind::Segment(i) => seg_targets.push((element.number, i)),
            ElementKind::Passenger(i) => pax_targets.push(i),
            ElementKind::Ssr(i) => ssr_targets.push(i),
            ElementKind::Osi(i) => osi_targets.push(i),
            ElementKind::Remark(i) => remark_targets.push(i),
            ElementKind::OptionElem(i) => option_targets.push(i),
            ElementKind::Contact(i) => contact_targets.push(i),
            ElementKind::Email(i) => email_targets.push(i),
            ElementKind::TicketTimeLimit => clear_tktl = true,
            ElementKind::FormOfPayment => clear_fp = true,
            ElementKind::Signature => clear_signature = true,
            ElementKind::TicketFa(_)
            | ElementKind::TicketFb(_)
            | ElementKind::Receipt(_)
            | ElementKind::RecordLocator => return Err(EngineError::NotAllowed),
        }
    }

    let active_seg_targets: Vec<(usize, usize)> = seg_targets
        .iter()
        .copied()
        .filter(|&(_, idx)| pnr.itinerary[idx].is_active())
        .collect();

    // Segment guards: pricing lock, then last-segment protection.
    if let Some(tst) = state.live_tst() {
        if active_seg_targets
            .iter()
            .any(|(number, _)| tst.segment_refs.contains(number))
        {
            return Err(EngineError::TstSegment);
        }
    }
    if !active_seg_targets.is_empty() && pnr.passengers.len() == 1 {
        let cancelled: BTreeSet<usize> =
            active_seg_targets.iter().map(|&(_, idx)| idx).collect();
        let survives = pnr
            .itinerary
            .iter()
            .enumerate()
            .any(|(idx, seg)| seg.is_active() && !cancelled.contains(&idx));
        if !survives {
            return Err(EngineError::LastSegment);
        }
    }

    // Passenger guards.
    if !pax_targets.is_empty() {
        if state.live_tst().is_some() {
            return Err(EngineError::TstPresent);
        }
        let targeted: BTreeSet<usize> = pax_targets.iter().copied().collect();
        for &idx in &pax_targets {
            let passenger = &pnr.passengers[idx];
            if passenger.pax_type == PaxType::Adt {
                let another_adult = pnr.passengers.iter().enumerate().any(|(j, p)| {
                    j != idx && p.pax_type == PaxType::Adt && !targeted.contains(&j)
                });
                if !another_adult {
                    return Err(EngineError::LastAdult);
                }
            }
            let dependent_infant = pnr.passengers.iter().enumerate().any(|(j, p)| {
                p.pax_type == PaxType::Inf
                    && p.linked_adult == Some(idx)
                    && !targeted.contains(&j)
            });
            if dependent_infant {
                return Err(EngineError::InfantAssociated);
            }
        }
    }

    let changes = active_seg_targets.len()
        + pax_targets.len()
        + ssr_targets.len()
        + osi_targets.len()
        + remark_targets.len()
        + option_targets.len()
        + contact_targets.len()
        + email_targets.len()
        + usize::from(clear_tktl)
        + usize::from(clear_fp)
        + usize::from(clear_signature);
    if changes == 0 {
        return Err(EngineError::NothingToCancel);
    }

    // Apply: passengers first, then segments, then simple lists by
    // descending index so earlier removals cannot shift later ones.
    let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoActivePnr)?;
    pax_targets.sort_unstable_by(|a, b| b.cmp(a));
    for idx in pax_targets {
        pnr.remove_passenger(idx);
    }
    for &(_, idx) in &active_seg_targets {
        pnr.itinerary[idx].status = SegmentStatus::Hx;
    }
    let remove_desc = |list: &mut Vec<String>, mut targets: Vec<usize>| {
        targets.sort_unstable_by(|a, b| b.cmp(a));
        for idx in targets {
            list.remove(idx);
        }
    };
    remove_desc(&mut pnr.ssrs, ssr_targets);
    remove_desc(&mut pnr.osis, osi_targets);
    remove_desc(&mut pnr.remarks, remark_targets);
    remove_desc(&mut pnr.contacts, contact_targets);
    remove_desc(&mut pnr.emails, email_targets);
    {
        let mut targets = option_targets;
        targets.sort_unstable_by(|a, b| b.cmp(a));
        for idx in targets {
            pnr.options.remove(idx);
        }
    }
    if clear_tktl {
        pnr.ticketing_time_limit = None;
    }
    if clear_fp {
        pnr.form_of_payment = None;
    }
    if clear_signature {
        pnr.signature = None;
    }

    let mut lines = vec!["ELEMENTS CANCELLED".to_string()];
    lines.extend(live_view(state, year));
    Ok(lines)
}

// ============================================================================
// Record lifecycle: commit / ignore / retrieve / cancel
// ============================================================================

fn handle_form_of_payment(
    state: &mut SessionState,
    text: String,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    state.ensure_pnr().form_of_payment = Some(text);
    if let Some(tst) = state.live_tst_mut() {
        if !matches!(tst.status, TstStatus::Ticketed) {
            tst.status = TstStatus::ReadyToTicket;
        }
    }
    Ok(live_view(state, year))
}

fn handle_commit(state: &mut SessionState, year: i32) -> Result<Vec<String>, EngineError> {
    let pnr = state.active_pnr.as_ref().ok_or(EngineError::NoActivePnr)?;

    if pnr.pending_cancellation {
        if let Some(locator) = pnr.record_locator.clone() {
            state.record_store.remove(&locator);
            if state.last_committed.as_deref() == Some(&locator) {
                state.last_committed = None;
            }
        }
        state.active_pnr = None;
        state.tsts.clear();
        return Ok(vec!["PNR CANCELLED".to_string()]);
    }

    if pnr.passengers.is_empty() || pnr.contacts.is_empty() || pnr.signature.is_none() {
        return Err(EngineError::EndPnrFirst);
    }

    let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoActivePnr)?;
    let locator = pnr
        .record_locator
        .clone()
        .unwrap_or_else(|| derive_locator(&pnr.content_fingerprint()));
    pnr.record_locator = Some(locator.clone());
    pnr.status = PnrStatus::Recorded;

    for tst in &mut state.tsts {
        if tst.status == TstStatus::Created {
            tst.status = TstStatus::Validated;
        }
    }

    let snapshot = {
        let pnr = state.active_pnr.as_ref().ok_or(EngineError::NoActivePnr)?;
        Snapshot::capture(pnr, &state.tsts)
    };
    state.record_store.insert(locator.clone(), snapshot);
    state.last_committed = Some(locator.clone());
    debug!(%locator, "reservation committed");

    let mut lines = vec![
        "PNR RECORDED".to_string(),
        format!("RECORD LOCATOR {}", locator),
    ];
    lines.extend(live_view(state, year));
    Ok(lines)
}

fn handle_restore(
    state: &mut SessionState,
    locator: Option<String>,
    year: i32,
    announce_ignore: bool,
) -> Result<Vec<String>, EngineError> {
    let snapshot = match &locator {
        // An explicit unknown locator is a lookup failure; only the implicit
        // form can report that nothing was ever committed.
        Some(locator) => state
            .record_store
            .get(locator)
            .ok_or(EngineError::PnrNotFound)?,
        None => {
            let last = state
                .last_committed
                .as_ref()
                .ok_or(EngineError::NoRecordedPnr)?;
            state
                .record_store
                .get(last)
                .ok_or(EngineError::NoRecordedPnr)?
        }
    };

    let (pnr, tsts) = snapshot.restore();
    state.active_pnr = Some(pnr);
    state.tsts = tsts;

    let mut lines = Vec::new();
    if announce_ignore {
        lines.push("IGNORED".to_string());
    }
    lines.extend(live_view(state, year));
    Ok(lines)
}

fn handle_cancel_pnr(state: &mut SessionState) -> Result<Vec<String>, EngineError> {
    let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoActivePnr)?;
    pnr.clear_for_cancellation();
    state.tsts.clear();
    Ok(vec![
        "PNR CANCELLATION PENDING - CONFIRM WITH ER".to_string(),
    ])
}

// ============================================================================
// Queues
// ============================================================================

fn handle_queue_place(state: &mut SessionState, name: &str) -> Result<Vec<String>, EngineError> {
    let locator = state
        .resolvable_locator()
        .ok_or(EngineError::NoRecordedPnr)?
        .to_string();
    state.queues.add(name, &locator);
    Ok(vec![format!(
        "OK - {} PLACED ON QUEUE {}",
        locator,
        name.to_uppercase()
    )])
}

fn handle_queue_display(state: &SessionState, name: &str) -> Result<Vec<String>, EngineError> {
    let entries = state
        .queues
        .entries(name)
        .ok_or(EngineError::QueueNotFound)?;

    let mut lines = vec![format!("QUEUE {}", name.to_uppercase())];
    if entries.is_empty() {
        lines.push("QUEUE EMPTY".to_string());
        return Ok(lines);
    }

    let pages = entries.len().div_ceil(QUEUE_PAGE_SIZE);
    for (page, chunk) in entries.chunks(QUEUE_PAGE_SIZE).enumerate() {
        if pages > 1 {
            lines.push(format!("PAGE {}/{}", page + 1, pages));
        }
        for (offset, locator) in chunk.iter().enumerate() {
            let position = page * QUEUE_PAGE_SIZE + offset + 1;
            lines.push(format!("{} {}", pad_left(&position.to_string(), 3), locator));
        }
    }
    Ok(lines)
}

fn handle_queue_enter(state: &mut SessionState, name: &str) -> Result<Vec<String>, EngineError> {
    if !state.queues.contains(name) {
        return Err(EngineError::QueueNotFound);
    }
    let name = name.to_uppercase();
    state.active_queue = Some(name.clone());
    Ok(vec![format!("QUEUE {} OPENED", name)])
}

fn handle_queue_next(state: &mut SessionState, year: i32) -> Result<Vec<String>, EngineError> {
    let queue = state
        .active_queue
        .clone()
        .ok_or(EngineError::NoActiveQueue)?;
    let Some(locator) = state.queues.pop_front(&queue) else {
        return Ok(vec!["QUEUE EMPTY".to_string()]);
    };
    let snapshot = state
        .record_store
        .get(&locator)
        .ok_or(EngineError::PnrNotFound)?;
    let (pnr, tsts) = snapshot.restore();
    state.active_pnr = Some(pnr);
    state.tsts = tsts;

    let mut lines = vec![format!("PNR FROM QUEUE {} {}", queue, locator)];
    lines.extend(live_view(state, year));
    Ok(lines)
}

fn handle_queue_leave(state: &mut SessionState) -> Result<Vec<String>, EngineError> {
    state
        .active_queue
        .take()
        .ok_or(EngineError::NoActiveQueue)?;
    Ok(vec!["QUEUE CLOSED".to_string()])
}

fn handle_queue_summary(state: &SessionState) -> Result<Vec<String>, EngineError> {
    let mut lines = vec!["QUEUE SUMMARY".to_string()];
    for (name, count) in state.queues.summary() {
        lines.push(format!("{} {}", name, count));
    }
    Ok(lines)
}

// ============================================================================
// Pricing
// ============================================================================

fn pax_mix(pnr: &crate::models::pnr::Pnr) -> Vec<(PaxType, u32)> {
    [PaxType::Adt, PaxType::Chd, PaxType::Inf]
        .into_iter()
        .filter_map(|pax_type| {
            let count = pnr
                .passengers
                .iter()
                .filter(|p| p.pax_type == pax_type)
                .count() as u32;
            (count > 0).then_some((pax_type, count))
        })
        .collect()
}

/// Active segments with their current element numbers, in display order.
fn active_segment_refs(
    pnr: &crate::models::pnr::Pnr,
    year: i32,
) -> (Vec<usize>, Vec<usize>, Vec<Segment>) {
    let mut numbers = Vec::new();
    let mut indices = Vec::new();
    let mut segments = Vec::new();
    for element in build_elements(pnr, year) {
        if let ElementKind::Segment(idx) = element.kind {
            if pnr.itinerary[idx].is_active() {
                numbers.push(element.number);
                indices.push(idx);
                segments.push(pnr.itinerary[idx].clone());
            }
        }
    }
    (numbers, indices, segments)
}

fn fare_lines(id: u32, result: &FareResult) -> Vec<String> {
    let mut lines = vec![format!(
        "TST {} VALIDATING CARRIER {}",
        id, result.validating_carrier
    )];
    for fare in &result.pax_fares {
        lines.push(format!(
            "{} {} {}",
            fare.mix_token(),
            result.currency,
            fmt_amount(fare.total)
        ));
    }
    lines.push(format!(
        "TOTAL {} {}",
        result.currency,
        fmt_amount(result.total)
    ));
    lines
}

/// Overwrite the live TST in place, or append a new one.
fn upsert_tst(
    state: &mut SessionState,
    refs: Vec<usize>,
    segments: Vec<Segment>,
    result: &FareResult,
    status: TstStatus,
) -> (u32, bool) {
    if let Some(tst) = state.live_tst_mut() {
        tst.status = status;
        tst.pax_fares = result.pax_fares.clone();
        tst.segment_refs = refs;
        tst.segments = segments;
        tst.validating_carrier = result.validating_carrier.clone();
        tst.fare_basis = result.fare_basis.clone();
        tst.currency = result.currency.clone();
        tst.total = result.total;
        (tst.id, false)
    } else {
        let id = state.next_tst_id;
        state.next_tst_id += 1;
        state.tsts.push(Tst {
            id,
            status,
            pax_fares: result.pax_fares.clone(),
            segment_refs: refs,
            segments,
            validating_carrier: result.validating_carrier.clone(),
            fare_basis: result.fare_basis.clone(),
            currency: result.currency.clone(),
            total: result.total,
        });
        (id, true)
    }
}

fn handle_price(
    state: &mut SessionState,
    deps: &Deps,
    mode: PriceMode,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    let pnr = state.active_pnr.as_ref().ok_or(EngineError::NoItinerary)?;
    if pnr.active_segment_count() == 0 {
        return Err(EngineError::NoItinerary);
    }
    let mix = pax_mix(pnr);
    let (numbers, indices, segments) = active_segment_refs(pnr, year);

    match mode {
        PriceMode::Store => {
            let result = deps
                .pricing
                .price(&PricingRequest {
                    segments: segments.clone(),
                    pax_mix: mix,
                    mode,
                })
                .map_err(|_| EngineError::InvalidFormat)?;
            let had_live = state.live_tst().is_some();
            let status = if had_live {
                TstStatus::Stored
            } else {
                TstStatus::Created
            };
            let (id, created) = upsert_tst(state, numbers, segments, &result, status);
            let mut lines = vec![if created {
                "TST CREATED".to_string()
            } else {
                "TST UPDATED".to_string()
            }];
            lines.extend(fare_lines(id, &result));
            Ok(lines)
        }
        PriceMode::BestBuy => {
            let new_classes = deps.pricing.rebook_classes(&segments, None);
            let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoItinerary)?;
            for (&idx, &class) in indices.iter().zip(&new_classes) {
                pnr.itinerary[idx].booking_class = class;
            }
            let (numbers, _, segments) = active_segment_refs(pnr, year);
            let mix = pax_mix(pnr);
            let result = deps
                .pricing
                .price(&PricingRequest {
                    segments: segments.clone(),
                    pax_mix: mix,
                    mode,
                })
                .map_err(|_| EngineError::InvalidFormat)?;
            let (id, _) = upsert_tst(state, numbers, segments, &result, TstStatus::Stored);
            let mut lines = vec!["TST COMMITTED".to_string()];
            lines.extend(fare_lines(id, &result));
            Ok(lines)
        }
        PriceMode::Rebook => {
            if state.live_tst().is_none() {
                return Err(EngineError::NoTst);
            }
            let old_classes: Vec<char> = segments.iter().map(|s| s.booking_class).collect();
            let new_classes = deps.pricing.rebook_classes(&segments, None);
            let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoItinerary)?;
            for (&idx, &class) in indices.iter().zip(&new_classes) {
                pnr.itinerary[idx].booking_class = class;
            }
            let (numbers, _, segments) = active_segment_refs(pnr, year);
            let mix = pax_mix(pnr);
            let result = deps
                .pricing
                .price(&PricingRequest {
                    segments: segments.clone(),
                    pax_mix: mix,
                    mode,
                })
                .map_err(|_| EngineError::InvalidFormat)?;
            let rebook_summary: Vec<String> = numbers
                .iter()
                .zip(old_classes.iter().zip(&new_classes))
                .map(|(number, (old, new))| format!("SEG {} {} -> {}", number, old, new))
                .collect();
            let (id, _) = upsert_tst(state, numbers, segments, &result, TstStatus::Repriced);
            let mut lines = vec!["TST REPRICED".to_string()];
            lines.extend(rebook_summary);
            lines.extend(fare_lines(id, &result));
            Ok(lines)
        }
        PriceMode::Quote => {
            let old_total = state.live_tst().ok_or(EngineError::NoTst)?.total;
            let currency = state
                .live_tst()
                .map(|t| t.currency.clone())
                .unwrap_or_else(|| "EUR".to_string());
            let new_classes = deps.pricing.rebook_classes(&segments, None);
            let mut quoted = segments;
            for (segment, &class) in quoted.iter_mut().zip(&new_classes) {
                segment.booking_class = class;
            }
            let result = deps
                .pricing
                .price(&PricingRequest {
                    segments: quoted,
                    pax_mix: mix,
                    mode,
                })
                .map_err(|_| EngineError::InvalidFormat)?;
            Ok(vec![
                format!("OLD {} {}", currency, fmt_amount(old_total)),
                format!("NEW {} {}", currency, fmt_amount(result.total)),
                format!("DIFF {} {}", currency, fmt_amount(old_total - result.total)),
            ])
        }
    }
}

fn handle_price_options(
    state: &SessionState,
    deps: &Deps,
    detailed: bool,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    let tst_id = state.live_tst().ok_or(EngineError::NoTst)?.id;
    let pnr = state.active_pnr.as_ref().ok_or(EngineError::NoItinerary)?;
    if pnr.active_segment_count() == 0 {
        return Err(EngineError::NoItinerary);
    }
    let mix = pax_mix(pnr);
    let (_, _, segments) = active_segment_refs(pnr, year);

    let mut lines = vec![format!("FXL TST {}", tst_id)];
    for step in 1u8..=3 {
        let classes = deps.pricing.rebook_classes(&segments, Some(step));
        let mut option = segments.clone();
        for (segment, &class) in option.iter_mut().zip(&classes) {
            segment.booking_class = class;
        }
        let result = deps
            .pricing
            .price(&PricingRequest {
                segments: option,
                pax_mix: mix.clone(),
                mode: PriceMode::Quote,
            })
            .map_err(|_| EngineError::InvalidFormat)?;
        let moves: Vec<String> = segments
            .iter()
            .zip(&classes)
            .map(|(seg, &new)| format!("{}-{}", seg.booking_class, new))
            .collect();
        lines.push(format!(
            "TST {} OPT {} {} {} {}",
            tst_id,
            step,
            result.currency,
            fmt_amount(result.total),
            moves.join("/")
        ));
        if detailed {
            lines.push(format!("FARE BASIS {}", result.fare_basis.join("/")));
        }
    }
    Ok(lines)
}

fn handle_tst_display(
    state: &SessionState,
    id: Option<u32>,
) -> Result<Vec<String>, EngineError> {
    let tst = match id {
        Some(id) => state.tsts.iter().find(|t| t.id == id),
        None => state.live_tst(),
    }
    .ok_or(EngineError::NoTst)?;

    let mut lines = vec![
        format!("TQT TST {}", tst.id),
        format!("TST {} VALIDATING CARRIER {}", tst.id, tst.validating_carrier),
    ];
    for segment in &tst.segments {
        lines.push(format!("   {}", segment_line(segment)));
    }
    if !tst.fare_basis.is_empty() {
        lines.push(format!("FARE BASIS {}", tst.fare_basis.join("/")));
    }
    for fare in &tst.pax_fares {
        let tax_total: i64 = fare.taxes.iter().map(|t| t.amount).sum();
        lines.push(format!(
            "{} BASE {} {} TAX {} {} TOTAL {} {}",
            fare.mix_token(),
            tst.currency,
            fmt_amount(fare.base),
            tst.currency,
            fmt_amount(tax_total),
            tst.currency,
            fmt_amount(fare.total)
        ));
        let detail: Vec<String> = fare
            .taxes
            .iter()
            .map(|tax| format!("{} {} {}", tax.code, tst.currency, fmt_amount(tax.amount)))
            .collect();
        lines.push(format!("TAX {}", detail.join(" ")));
    }
    lines.push(format!("TOTAL {} {}", tst.currency, fmt_amount(tst.total)));
    lines.push(format!("STATUS {}", tst.status.label()));
    Ok(lines)
}

fn handle_fare_notes(
    state: &SessionState,
    index: Option<usize>,
) -> Result<Vec<String>, EngineError> {
    let tst = state.live_tst().ok_or(EngineError::NoTst)?;
    if tst.fare_basis.is_empty() {
        return Err(EngineError::NoTst);
    }

    let selected: Vec<(usize, &String)> = match index {
        Some(i) => {
            let basis = tst
                .fare_basis
                .get(i.checked_sub(1).ok_or(EngineError::ElementNotFound)?)
                .ok_or(EngineError::ElementNotFound)?;
            vec![(i, basis)]
        }
        None => tst.fare_basis.iter().enumerate().map(|(i, b)| (i + 1, b)).collect(),
    };

    let mut lines = Vec::new();
    for (i, basis) in selected {
        lines.push(format!("FQN {}", i));
        lines.extend(fare_note(basis));
    }
    Ok(lines)
}

// ============================================================================
// Ticketing and receipts
// ============================================================================

fn handle_ticket_issue(
    state: &mut SessionState,
    deps: &Deps,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    let pnr = state.active_pnr.as_ref().ok_or(EngineError::NoItinerary)?;
    if pnr.active_segment_count() == 0 {
        return Err(EngineError::NoItinerary);
    }
    let tst_id = state.live_tst().ok_or(EngineError::NoTst)?.id;
    if pnr.form_of_payment.is_none() {
        return Err(EngineError::NoFormOfPayment);
    }
    if pnr
        .tickets
        .iter()
        .any(|t| !t.is_void() && t.tst_id == tst_id)
    {
        return Err(EngineError::TicketAlreadyIssued);
    }

    let sequence = state.next_ticket_seq;
    state.next_ticket_seq += 1;
    let number = format_ticket_number(sequence);
    debug!(ticket = %number, tst = tst_id, "ticket issued");

    if let Some(tst) = state.live_tst_mut() {
        tst.status = TstStatus::Ticketed;
    }
    let issued_at = deps.clock.now();
    let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoItinerary)?;
    pnr.tickets.push(Ticket {
        number: number.clone(),
        tst_id,
        status: TicketStatus::Issued,
        issued_at,
        voided_at: None,
    });

    let mut lines = vec![format!("TICKET ISSUED {}", number)];
    lines.extend(live_view(state, year));
    Ok(lines)
}

fn handle_ticket_void(
    state: &mut SessionState,
    deps: &Deps,
    number: Option<String>,
    year: i32,
) -> Result<Vec<String>, EngineError> {
    let now = deps.clock.now();
    let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoTicket)?;

    let index = match &number {
        Some(number) => {
            let index = pnr
                .tickets
                .iter()
                .position(|t| &t.number == number)
                .ok_or(EngineError::NoTicket)?;
            if pnr.tickets[index].is_void() {
                return Err(EngineError::FunctionNotApplicable);
            }
            index
        }
        None => pnr
            .tickets
            .iter()
            .rposition(|t| !t.is_void())
            .ok_or(EngineError::NoTicket)?,
    };

    pnr.tickets[index].status = TicketStatus::Void;
    pnr.tickets[index].voided_at = Some(now);
    let voided_number = pnr.tickets[index].number.clone();
    let tst_id = pnr.tickets[index].tst_id;

    let sibling_remains = pnr
        .tickets
        .iter()
        .any(|t| !t.is_void() && t.tst_id == tst_id);
    if !sibling_remains {
        if let Some(tst) = state.tsts.iter_mut().find(|t| t.id == tst_id) {
            tst.status = TstStatus::Void;
        }
    }

    let mut lines = vec![format!("TICKET {} VOIDED", voided_number)];
    lines.extend(live_view(state, year));
    Ok(lines)
}

fn handle_receipt(state: &mut SessionState, year: i32) -> Result<Vec<String>, EngineError> {
    let pnr = state.active_pnr.as_mut().ok_or(EngineError::NoTicket)?;
    let ticket_number = pnr
        .last_live_ticket()
        .map(|t| t.number.clone())
        .ok_or(EngineError::NoTicket)?;
    let email = pnr
        .emails
        .last()
        .cloned()
        .ok_or(EngineError::NoEmailAddress)?;

    let receipt = crate::models::ticket::Receipt {
        ticket_number,
        passenger_name: pnr
            .passengers
            .first()
            .map(Passenger::display)
            .unwrap_or_default(),
        email: email.clone(),
        segments: pnr.active_segments().map(Segment::route_string).collect(),
    };
    pnr.receipts.push(receipt);

    let mut lines = vec![format!("ITINERARY RECEIPT SENT - {}", email)];
    lines.extend(live_view(state, year));
    Ok(lines)
}
