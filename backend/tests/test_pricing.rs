//! Pricing command tests: TST lifecycle, rebooking, quotes, option lists,
//! and the FXB-never-above-FXP ordering guarantee.

use pnr_simulator_core::events::EventKind;
use pnr_simulator_core::{process_command, Deps, Event, FixedClock, SessionState, TstStatus};

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

#[test]
fn test_pricing_requires_an_itinerary() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    for cmd in ["FXP", "FXB"] {
        let events = process_command(&mut state, cmd, &deps(&clock));
        assert_eq!(errors(&events), ["NO ITINERARY"], "{}", cmd);
    }
}

#[test]
fn test_displays_require_a_tst() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    for cmd in ["FXL", "TQT", "FQN"] {
        let mut state = SessionState::new();
        let events = process_command(&mut state, cmd, &deps(&clock));
        assert_eq!(errors(&events), ["NO TST"], "{}", cmd);
    }
}

#[test]
fn test_fxp_creates_and_overwrites_in_place() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR"],
    );

    let events = process_command(&mut state, "FXP", &deps(&clock));
    let lines = texts(&events);
    assert!(lines.contains(&"TST CREATED".to_string()));
    assert!(lines.iter().any(|l| l.starts_with("ADT*1 EUR ")));
    assert!(lines.iter().any(|l| l.starts_with("TOTAL EUR ")));
    assert_eq!(state.tsts.len(), 1);
    assert_eq!(state.tsts[0].id, 1);
    assert_eq!(state.tsts[0].status, TstStatus::Created);
    assert_eq!(state.tsts[0].segment_refs, vec![2]);
    assert_eq!(state.tsts[0].currency, "EUR");
    assert!(state.tsts[0].total > 0);

    // Repricing overwrites the same transaction, id included.
    let events = process_command(&mut state, "FXP", &deps(&clock));
    assert!(texts(&events).contains(&"TST UPDATED".to_string()));
    assert_eq!(state.tsts.len(), 1);
    assert_eq!(state.tsts[0].id, 1);
    assert_eq!(state.tsts[0].status, TstStatus::Stored);
}

#[test]
fn test_fxx_requires_a_tst_then_rebooks() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), &["AN26DECALGPAR", "SS1Y1"]);

    let events = process_command(&mut state, "FXX", &deps(&clock));
    assert_eq!(errors(&events), ["NO TST"]);

    process_command(&mut state, "FXP", &deps(&clock));
    let before = state.tsts[0].total;
    let events = process_command(&mut state, "FXX", &deps(&clock));
    assert!(errors(&events).is_empty());
    assert!(texts(&events).contains(&"TST REPRICED".to_string()));
    assert_eq!(state.tsts[0].status, TstStatus::Repriced);
    assert!(state.tsts[0].total <= before);
    assert_ne!(
        state.active_pnr.as_ref().unwrap().itinerary[0].booking_class,
        'Y',
        "FXX rebooks the itinerary itself"
    );
}

#[test]
fn test_fxb_never_prices_above_fxp() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let price_with = |cmd: &str| {
        let mut state = SessionState::new();
        run(
            &mut state,
            &deps(&clock),
            &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR", cmd],
        );
        state.tsts[0].total
    };
    assert!(price_with("FXB") <= price_with("FXP"));
}

#[test]
fn test_fxb_commits() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR"],
    );
    let events = process_command(&mut state, "FXB", &deps(&clock));
    assert!(texts(&events).contains(&"TST COMMITTED".to_string()));
    assert_eq!(state.tsts[0].status, TstStatus::Stored);
}

#[test]
fn test_fxr_quotes_without_mutating() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR", "FXP"],
    );
    let class_before = state.active_pnr.as_ref().unwrap().itinerary[0].booking_class;
    let tst_before = state.tsts.clone();

    let events = process_command(&mut state, "FXR", &deps(&clock));
    assert!(errors(&events).is_empty());
    let lines = texts(&events);
    assert!(lines[0].starts_with("OLD EUR "));
    assert!(lines[1].starts_with("NEW EUR "));
    assert!(lines[2].starts_with("DIFF EUR "));

    assert_eq!(
        state.active_pnr.as_ref().unwrap().itinerary[0].booking_class,
        class_before
    );
    assert_eq!(state.tsts, tst_before);
}

#[test]
fn test_fxl_lists_three_options() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR", "FXP"],
    );

    let events = process_command(&mut state, "FXL", &deps(&clock));
    let lines = texts(&events);
    assert!(lines.iter().any(|l| l.starts_with("TST 1 OPT 1")));
    assert!(lines.iter().any(|l| l.starts_with("TST 1 OPT 2")));
    assert!(lines.iter().any(|l| l.starts_with("TST 1 OPT 3")));
    assert!(!lines.iter().any(|l| l.contains("FARE BASIS")));

    // Options are read-only.
    assert_eq!(
        state.active_pnr.as_ref().unwrap().itinerary[0].booking_class,
        'Y'
    );

    let events = process_command(&mut state, "FXL1", &deps(&clock));
    assert!(texts(&events).iter().any(|l| l.contains("FARE BASIS")));
}

#[test]
fn test_fxl_options_get_cheaper_with_aggressiveness() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR", "FXP"],
    );
    let events = process_command(&mut state, "FXL", &deps(&clock));
    let totals: Vec<f64> = texts(&events)
        .iter()
        .filter(|l| l.starts_with("TST 1 OPT "))
        .map(|l| l.split_whitespace().nth(5).unwrap().parse().unwrap())
        .collect();
    assert_eq!(totals.len(), 3);
    assert!(totals[0] >= totals[1]);
    assert!(totals[1] >= totals[2]);
}

#[test]
fn test_tqt_displays_the_transaction() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &[
            "AN26DECALGPAR",
            "SS1Y2",
            "NM1DOE/JOHN MR",
            "NM1DOE/JIM (CHD/10)",
            "FXP",
        ],
    );
    let events = process_command(&mut state, "TQT", &deps(&clock));
    let lines = texts(&events);
    assert_eq!(lines[0], "TQT TST 1");
    assert!(lines.iter().any(|l| l.contains("VALIDATING CARRIER")));
    assert!(lines.iter().any(|l| l.contains("FARE BASIS")));
    assert!(lines.iter().any(|l| l.starts_with("ADT*1 BASE EUR ")));
    assert!(lines.iter().any(|l| l.starts_with("CHD*1 BASE EUR ")));
    assert!(lines.iter().any(|l| l.starts_with("TAX ")));
    assert!(lines.iter().any(|l| l.starts_with("STATUS ")));

    // Adults pay more than children for the same itinerary.
    let adt = state.tsts[0].pax_fares[0].total;
    let chd = state.tsts[0].pax_fares[1].total;
    assert!(adt > chd);

    let events = process_command(&mut state, "TQT9", &deps(&clock));
    assert_eq!(errors(&events), ["NO TST"]);
}

#[test]
fn test_fqn_shows_fare_notes() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(
        &mut state,
        &deps(&clock),
        &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR", "FXP"],
    );
    let events = process_command(&mut state, "FQN", &deps(&clock));
    let lines = texts(&events);
    assert_eq!(lines[0], "FQN 1");
    assert!(lines.iter().any(|l| l.starts_with("FARE BASIS ")));
    assert!(lines.iter().any(|l| l.starts_with("BAGGAGE ALLOWANCE ")));

    let events = process_command(&mut state, "FQN9", &deps(&clock));
    assert_eq!(errors(&events), ["ELEMENT NOT FOUND"]);
}

#[test]
fn test_pricing_with_no_names_defaults_to_one_adult() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let mut state = SessionState::new();
    run(&mut state, &deps(&clock), &["AN26DECALGPAR", "SS1Y1", "FXP"]);
    assert_eq!(state.tsts.len(), 1);
    assert_eq!(state.tsts[0].pax_fares.len(), 1);
    assert_eq!(state.tsts[0].pax_fares[0].count, 1);
}

#[test]
fn test_pricing_is_deterministic_across_sessions() {
    let clock = FixedClock::at_ymd(2030, 12, 1);
    let run_total = || {
        let mut state = SessionState::new();
        run(
            &mut state,
            &deps(&clock),
            &["AN26DECALGPAR", "SS1Y1", "NM1DOE/JOHN MR", "FXP"],
        );
        (state.tsts[0].total, state.tsts[0].fare_basis.clone())
    };
    assert_eq!(run_total(), run_total());
}
