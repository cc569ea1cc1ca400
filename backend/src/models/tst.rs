//! Priced transaction (TST) model
//!
//! A TST freezes the result of a pricing command: the passenger-mix
//! breakdown, the element numbers and a copy of the segments it covers, the
//! fare basis codes, and the tax/total figures consumed by ticketing.
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. At most one TST is live (non-void) at a time
//! 3. Pricing commands overwrite the live TST in place; its id never changes
//! 4. A segment referenced by the live TST cannot be cancelled

use crate::models::passenger::PaxType;
use crate::models::segment::Segment;
use serde::{Deserialize, Serialize};

/// Transaction lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TstStatus {
    /// Freshly created by a pricing command
    Created,
    /// Stored after a best-buy/overwrite pricing pass
    Stored,
    /// Rebooked and repriced over an earlier TST
    Repriced,
    /// Live TST with a form of payment on file
    ReadyToTicket,
    /// Promoted on end-transaction of the reservation
    Validated,
    /// A ticket has been issued against it
    Ticketed,
    /// Voided together with its last ticket
    Void,
}

impl TstStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TstStatus::Created => "CREATED",
            TstStatus::Stored => "STORED",
            TstStatus::Repriced => "REPRICED",
            TstStatus::ReadyToTicket => "READY TO TICKET",
            TstStatus::Validated => "VALIDATED",
            TstStatus::Ticketed => "TICKETED",
            TstStatus::Void => "VOID",
        }
    }
}

/// One tax figure, per passenger of the owning type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    /// Two-letter tax code (`FR`, `QX`, `YQ`, `XT`)
    pub code: String,

    /// Amount in cents
    pub amount: i64,
}

/// Fare breakdown for one passenger type in the mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaxFare {
    pub pax_type: PaxType,

    /// Number of passengers of this type
    pub count: u32,

    /// Base fare per passenger, in cents
    pub base: i64,

    /// Taxes per passenger
    pub taxes: Vec<TaxLine>,

    /// Base plus taxes per passenger, in cents
    pub total: i64,
}

impl PaxFare {
    /// `ADT*2` style mix token.
    pub fn mix_token(&self) -> String {
        format!("{}*{}", self.pax_type.code(), self.count)
    }
}

/// A priced transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tst {
    /// 1-based transaction identifier, stable across overwrites
    pub id: u32,

    pub status: TstStatus,

    /// Fare breakdown per passenger type, adults first
    pub pax_fares: Vec<PaxFare>,

    /// Element numbers of the covered segments at pricing time
    pub segment_refs: Vec<usize>,

    /// Frozen copies of the covered segments
    pub segments: Vec<Segment>,

    pub validating_carrier: String,

    /// One fare basis code per covered segment
    pub fare_basis: Vec<String>,

    /// ISO currency code, `EUR` in this simulation
    pub currency: String,

    /// Grand total across the whole mix, in cents
    pub total: i64,
}

impl Tst {
    /// `ADT*1 CHD*1` style summary of the passenger mix.
    pub fn mix_summary(&self) -> String {
        self.pax_fares
            .iter()
            .map(PaxFare::mix_token)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_live(&self) -> bool {
        self.status != TstStatus::Void
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tst() -> Tst {
        Tst {
            id: 1,
            status: TstStatus::Created,
            pax_fares: vec![
                PaxFare {
                    pax_type: PaxType::Adt,
                    count: 1,
                    base: 15000,
                    taxes: vec![TaxLine {
                        code: "YQ".to_string(),
                        amount: 900,
                    }],
                    total: 15900,
                },
                PaxFare {
                    pax_type: PaxType::Chd,
                    count: 2,
                    base: 11250,
                    taxes: Vec::new(),
                    total: 11250,
                },
            ],
            segment_refs: vec![2],
            segments: Vec::new(),
            validating_carrier: "PC".to_string(),
            fare_basis: vec!["Y47PC".to_string()],
            currency: "EUR".to_string(),
            total: 38400,
        }
    }

    #[test]
    fn test_mix_summary() {
        assert_eq!(tst().mix_summary(), "ADT*1 CHD*2");
    }

    #[test]
    fn test_void_is_not_live() {
        let mut tst = tst();
        assert!(tst.is_live());
        tst.status = TstStatus::Void;
        assert!(!tst.is_live());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TstStatus::ReadyToTicket.label(), "READY TO TICKET");
        assert_eq!(TstStatus::Ticketed.label(), "TICKETED");
    }
}
