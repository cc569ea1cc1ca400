//! Passenger model
//!
//! A reservation carries an ordered passenger list; insertion order is
//! significant because element numbering and infant links both refer to it.
//!
//! # Critical Invariants
//!
//! 1. An infant may be linked to one adult (by passenger-list index)
//! 2. An adult with a linked infant cannot be removed
//! 3. The last adult on a named reservation cannot be removed

use serde::{Deserialize, Serialize};

/// Passenger type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaxType {
    /// Adult
    Adt,
    /// Child
    Chd,
    /// Infant (no seat)
    Inf,
}

impl PaxType {
    /// Three-letter display code (`ADT` / `CHD` / `INF`).
    pub fn code(&self) -> &'static str {
        match self {
            PaxType::Adt => "ADT",
            PaxType::Chd => "CHD",
            PaxType::Inf => "INF",
        }
    }

    /// Fare multiplier applied to this passenger type.
    pub fn fare_multiplier(&self) -> f64 {
        match self {
            PaxType::Adt => 1.0,
            PaxType::Chd => 0.75,
            PaxType::Inf => 0.10,
        }
    }
}

/// One passenger name element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub last_name: String,
    pub first_name: String,
    pub pax_type: PaxType,

    /// Adult title (`MR` / `MRS`), empty when not given
    pub title: Option<String>,

    /// Child age in years, when given
    pub age: Option<u8>,

    /// For infants: passenger-list index of the linked adult
    pub linked_adult: Option<usize>,
}

impl Passenger {
    pub fn adult(last_name: &str, first_name: &str, title: Option<&str>) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            pax_type: PaxType::Adt,
            title: title.map(str::to_string),
            age: None,
            linked_adult: None,
        }
    }

    pub fn child(last_name: &str, first_name: &str, age: Option<u8>) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            pax_type: PaxType::Chd,
            title: None,
            age,
            linked_adult: None,
        }
    }

    pub fn infant(last_name: &str, first_name: &str, linked_adult: Option<usize>) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            pax_type: PaxType::Inf,
            title: None,
            age: None,
            linked_adult,
        }
    }

    /// Screen form of the name.
    ///
    /// `DOE/JOHN MR`, `DOE/JIM (CHD/10)`, `DOE/JANE (INF)`.
    pub fn display(&self) -> String {
        let base = format!("{}/{}", self.last_name, self.first_name);
        match self.pax_type {
            PaxType::Chd => match self.age {
                Some(age) => format!("{} (CHD/{})", base, age),
                None => format!("{} (CHD)", base),
            },
            PaxType::Inf => format!("{} (INF)", base),
            PaxType::Adt => match self.title.as_deref() {
                Some(title) if !title.is_empty() => format!("{} {}", base, title),
                _ => base,
            },
        }
    }

    /// Stable identity used for content-derived record locators.
    pub fn identity(&self) -> String {
        format!(
            "{}/{}:{}",
            self.last_name,
            self.first_name,
            self.pax_type.code()
        )
    }
}
