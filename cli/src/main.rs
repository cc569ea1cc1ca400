//! Terminal driver for the PNR workstation simulator.
//!
//! Reads one command per line from stdin, threads the session state through
//! the engine, and prints the event stream. The fancy front-end concerns
//! (history, highlighting) live elsewhere; this binary is the minimal caller
//! the engine contract describes.

use pnr_simulator_core::locations::Location;
use pnr_simulator_core::{
    process_command, Deps, InMemoryLocations, SessionState, SimAvailability, SimPricing,
    SystemClock,
};
use std::io::{self, BufRead, Write};

fn seed_locations() -> InMemoryLocations {
    let mut provider = InMemoryLocations::new();
    provider.seed(vec![
        Location {
            iata: "ALG".to_string(),
            kind: "A".to_string(),
            city: "ALGIERS".to_string(),
            country: "ALGERIA".to_string(),
            name: "HOUARI BOUMEDIENE".to_string(),
            region: Some("AFRICA".to_string()),
        },
        Location {
            iata: "PAR".to_string(),
            kind: "C".to_string(),
            city: "PARIS".to_string(),
            country: "FRANCE".to_string(),
            name: "PARIS".to_string(),
            region: Some("EUROPE".to_string()),
        },
        Location {
            iata: "CDG".to_string(),
            kind: "A".to_string(),
            city: "PARIS".to_string(),
            country: "FRANCE".to_string(),
            name: "CHARLES DE GAULLE".to_string(),
            region: Some("EUROPE".to_string()),
        },
        Location {
            iata: "IST".to_string(),
            kind: "A".to_string(),
            city: "ISTANBUL".to_string(),
            country: "TURKEY".to_string(),
            name: "ISTANBUL AIRPORT".to_string(),
            region: Some("EUROPE".to_string()),
        },
        Location {
            iata: "SAW".to_string(),
            kind: "A".to_string(),
            city: "ISTANBUL".to_string(),
            country: "TURKEY".to_string(),
            name: "SABIHA GOKCEN".to_string(),
            region: Some("EUROPE".to_string()),
        },
    ]);
    provider
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let locations = seed_locations();
    let clock = SystemClock;
    let availability = SimAvailability;
    let pricing = SimPricing;
    let deps = Deps {
        clock: &clock,
        availability: &availability,
        pricing: &pricing,
        locations: Some(&locations),
    };
    let mut state = SessionState::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("AMADEUS SELLING PLATFORM");
    println!("TRAINING MODE");
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        for event in process_command(&mut state, &line, &deps) {
            println!("{}", event.text);
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}
