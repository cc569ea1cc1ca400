//! Ticketing tests: issue preconditions, the one-live-ticket rule, voiding
//! with TST cascade, and itinerary receipts.

use pnr_simulator_core::events::EventKind;
use pnr_simulator_core::{
    process_command, Deps, Event, FixedClock, SessionState, TicketStatus, TstStatus,
};

fn deps(clock: &FixedClock) -> Deps {
    Deps::with_clock(clock)
}

fn run(state: &mut SessionState, deps: &Deps, commands: &[&str]) {
    for cmd in commands {
        process_command(state, cmd, deps);
    }
}

fn texts(events: &[Event]) -> Vec<String> {
    events.iter().map(|e| e.text.clone()).collect()
}

fn errors(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.kind == EventKind::Error)
        .map(|e| e.text.clone())
        .collect()
}

const BOOKED: &[&str] = &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR"];

#[test]
fn test_issue_preconditions_in_order() {
    let clock = FixedClock::at_ymd(2030, 12, 1);

    let mut state = SessionState::new();
    let events = process_command(&mut state, "ET", &deps(&clock));
    assert_eq!(errors(&events), ["NO ITINERARY"]);

    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    let events = process_command(&mut state, "ET", &deps(&clock));
    assert_eq!(errors(&events), ["NO TST"]);
    assert!(state.active_pnr.as_ref().unwrap().tickets.is_empty());

    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FXP"]);
    let events = process_command(&mut state, "ET", &deps(&clock));
    assert_eq!(errors(&events), ["NO FORM OF PAYMENT"]);
    assert!(state.active_pnr.as_ref().unwrap().tickets.is_empty());
}

#[test]
fn test_issue_allocates_sequence_and_marks_tst() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FP CASH", "FXP"]);

    let events = process_command(&mut state, "ET", &deps(&clock));
    assert!(errors(&events).is_empty());
    assert!(texts(&events).contains(&"TICKET ISSUED 172-0000000001".to_string()));

    let pnr = state.active_pnr.as_ref().unwrap();
    assert_eq!(pnr.tickets.len(), 1);
    assert_eq!(pnr.tickets[0].number, "172-0000000001");
    assert_eq!(pnr.tickets[0].status, TicketStatus::Issued);
    assert_eq!(state.tsts[0].status, TstStatus::Ticketed);

    let events = process_command(&mut state, "RT", &deps(&clock));
    let lines = texts(&events);
    assert!(lines.iter().any(|l| l.contains("FA 172-0000000001 ET")));
    assert!(lines.iter().any(|l| l.contains("FB TST1")));
    assert!(lines
        .iter()
        .any(|l| l.contains("TST 1") && l.contains("STATUS TICKETED")));
}

#[test]
fn test_ttp_is_an_alias_for_et() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FP CASH", "FXP"]);
    let events = process_command(&mut state, "TTP", &deps(&clock));
    assert!(errors(&events).is_empty());
    assert_eq!(state.active_pnr.as_ref().unwrap().tickets.len(), 1);
}

#[test]
fn test_double_issue_is_rejected() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FP CASH", "FXP", "ET"]);
    let events = process_command(&mut state, "ET", &deps(&clock));
    assert_eq!(errors(&events), ["TICKET ALREADY ISSUED"]);
    assert_eq!(state.active_pnr.as_ref().unwrap().tickets.len(), 1);
}

#[test]
fn test_void_without_ticket() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    let events = process_command(&mut state, "VOID", &deps(&clock));
    assert_eq!(errors(&events), ["NO TICKET"]);
}

#[test]
fn test_void_cascades_to_the_tst() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FP CASH", "FXP", "ET"]);

    let events = process_command(&mut state, "VOID", &deps(&clock));
    assert!(errors(&events).is_empty());
    let pnr = state.active_pnr.as_ref().unwrap();
    assert_eq!(pnr.tickets[0].status, TicketStatus::Void);
    assert!(pnr.tickets[0].voided_at.is_some());
    assert_eq!(state.tsts[0].status, TstStatus::Void);

    let events = process_command(&mut state, "RT", &deps(&clock));
    assert!(texts(&events)
        .iter()
        .any(|l| l.contains("FA 172-0000000001 VOID")));
}

#[test]
fn test_void_by_explicit_number() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FP CASH", "FXP", "ET"]);

    let events = process_command(&mut state, "VOID 172-9999999999", &deps(&clock));
    assert_eq!(errors(&events), ["NO TICKET"]);

    let events = process_command(&mut state, "VOID 172-0000000001", &deps(&clock));
    assert!(errors(&events).is_empty());

    // Voiding it again is not applicable.
    let events = process_command(&mut state, "VOID 172-0000000001", &deps(&clock));
    assert_eq!(errors(&events), ["FUNCTION NOT APPLICABLE"]);
}

#[test]
fn test_ticket_sequence_is_global() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FP CASH", "FXP", "ET", "VOID"]);

    // The voided TST is dead; a fresh pricing pass opens TST 2 and the next
    // ticket continues the global sequence.
    run(&mut state, &deps(&clock), &["FXP", "ET"]);
    let pnr = state.active_pnr.as_ref().unwrap();
    assert_eq!(pnr.tickets.len(), 2);
    assert_eq!(pnr.tickets[1].number, "172-0000000002");
    assert_eq!(pnr.tickets[1].tst_id, 2);
    assert_eq!(state.tsts.len(), 2);
    assert_eq!(state.tsts[1].status, TstStatus::Ticketed);
}

#[test]
fn test_receipt_preconditions() {
    let clock = FixedClock::at_ymd(2030, 12, 1);

    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &["NM1DOE/JOHN MR", "APE-JOHN.DOE@EXAMPLE.COM"],
    );
    let events = process_command(&mut state, "ITR-EML", &deps(&clock));
    assert_eq!(errors(&events), ["NO TICKET"]);

    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(&mut state, &deps(&clock), &["FP CASH", "FXP", "ET"]);
    let events = process_command(&mut state, "ITR-EML", &deps(&clock));
    assert_eq!(errors(&events), ["NO EMAIL ADDRESS"]);
}

#[test]
fn test_receipt_references_ticket_passenger_and_route() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), BOOKED);
    run(
        &mut state,
        &deps(&clock),
        &["FP CASH", "FXP", "ET", "APE-JOHN.DOE@EXAMPLE.COM"],
    );

    let events = process_command(&mut state, "ITR-EML", &deps(&clock));
    assert!(errors(&events).is_empty());

    let pnr = state.active_pnr.as_ref().unwrap();
    assert_eq!(pnr.receipts.len(), 1);
    let receipt = &pnr.receipts[0];
    assert_eq!(receipt.ticket_number, "172-0000000001");
    assert!(receipt.passenger_name.contains("DOE/JOHN"));
    assert_eq!(receipt.email, "JOHN.DOE@EXAMPLE.COM");
    assert_eq!(receipt.segments, vec!["ALGPAR 26DEC".to_string()]);

    let events = process_command(&mut state, "RT", &deps(&clock));
    assert!(texts(&events).iter().any(|l| l.contains("ITR-EML 172-0000000001")));
}
