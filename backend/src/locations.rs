//! Location lookup collaborator
//!
//! IATA decode (DAC) and free-text search (DAN) live behind this interface.
//! The engine never loads location data itself: the caller owns a provider
//! instance and passes it in, which keeps the dataset cache out of any
//! process-wide singleton. When no provider is configured the commands fail
//! with a distinct, reported error instead of silently falling back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Maximum rows a text search returns.
const SEARCH_LIMIT: usize = 25;

/// Provider-side failures. The command layer downgrades any of these to a
/// generic format error; they never cross the engine boundary as panics.
#[derive(Debug, Error)]
pub enum LocationsError {
    #[error("location dataset not loaded")]
    NotLoaded,

    #[error("location lookup failed: {0}")]
    Lookup(String),
}

/// Location decode/search interface.
///
/// Both calls return ready-to-print screen lines; the data shape is the
/// provider's own business.
pub trait Locations {
    /// Decode one IATA code into its display block.
    fn decode_iata(&self, code: &str) -> Result<Vec<String>, LocationsError>;

    /// Search locations by free text.
    fn search_by_text(&self, text: &str) -> Result<Vec<String>, LocationsError>;
}

/// One location row of the seeded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub iata: String,
    /// `A` airport, `C` city, ...
    pub kind: String,
    pub city: String,
    pub country: String,
    pub name: String,
    pub region: Option<String>,
}

/// Seeded in-memory location dataset.
///
/// Loading is an explicit, caller-driven step; until then lookups fail with
/// [`LocationsError::NotLoaded`].
///
/// # Example
/// ```
/// use pnr_simulator_core::locations::{InMemoryLocations, Location, Locations};
///
/// let mut provider = InMemoryLocations::new();
/// provider.seed(vec![Location {
///     iata: "ALG".to_string(),
///     kind: "A".to_string(),
///     city: "ALGIERS".to_string(),
///     country: "ALGERIA".to_string(),
///     name: "HOUARI BOUMEDIENE".to_string(),
///     region: None,
/// }]);
/// let lines = provider.decode_iata("alg").unwrap();
/// assert_eq!(lines[0], "DAC ALG");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocations {
    by_iata: BTreeMap<String, Location>,
    loaded: bool,
}

impl InMemoryLocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset. Returns the number of usable rows.
    pub fn seed(&mut self, locations: Vec<Location>) -> usize {
        self.by_iata.clear();
        for mut location in locations {
            location.iata = location.iata.trim().to_uppercase();
            if !location.iata.is_empty() {
                self.by_iata.insert(location.iata.clone(), location);
            }
        }
        self.loaded = true;
        self.by_iata.len()
    }

    /// Load the dataset from its JSON array form.
    pub fn seed_from_json(&mut self, json: &str) -> Result<usize, LocationsError> {
        let locations: Vec<Location> =
            serde_json::from_str(json).map_err(|e| LocationsError::Lookup(e.to_string()))?;
        Ok(self.seed(locations))
    }

    fn ensure_loaded(&self) -> Result<(), LocationsError> {
        if self.loaded {
            Ok(())
        } else {
            Err(LocationsError::NotLoaded)
        }
    }
}

impl Locations for InMemoryLocations {
    fn decode_iata(&self, code: &str) -> Result<Vec<String>, LocationsError> {
        self.ensure_loaded()?;

        let iata = code.trim().to_uppercase();
        if iata.len() != 3 || !iata.bytes().all(|b| b.is_ascii_uppercase()) {
            return Ok(vec!["INVALID FORMAT".to_string()]);
        }

        let Some(location) = self.by_iata.get(&iata) else {
            return Ok(vec!["NO MATCH".to_string()]);
        };

        let mut lines = vec![
            format!("DAC {}", iata),
            "CODE TYPE CITY / COUNTRY".to_string(),
            format!(
                "{}  {}   {} / {}",
                location.iata, location.kind, location.city, location.country
            ),
            format!("NAME: {}", location.name),
        ];
        if let Some(region) = &location.region {
            lines.push(format!("REGION: {}", region));
        }
        Ok(lines)
    }

    fn search_by_text(&self, text: &str) -> Result<Vec<String>, LocationsError> {
        self.ensure_loaded()?;

        let query = text.trim().to_uppercase();
        if query.is_empty() {
            return Ok(vec!["INVALID FORMAT".to_string()]);
        }

        let mut hits = Vec::new();
        for location in self.by_iata.values() {
            let haystack = format!(
                "{} {} {} {} {}",
                location.iata,
                location.city,
                location.name,
                location.country,
                location.region.as_deref().unwrap_or("")
            )
            .to_uppercase();
            if haystack.contains(&query) {
                hits.push(location);
            }
            if hits.len() >= SEARCH_LIMIT {
                break;
            }
        }

        if hits.is_empty() {
            return Ok(vec![format!("DAN {}", query), "NO MATCH".to_string()]);
        }

        let mut lines = vec![
            format!("DAN {}", query),
            "CODE TYPE CITY - NAME / COUNTRY".to_string(),
        ];
        lines.extend(hits.iter().map(|location| {
            format!(
                "{}  {}   {} - {} / {}",
                location.iata, location.kind, location.city, location.name, location.country
            )
        }));
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryLocations {
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
                region: None,
            },
        ]);
        provider
    }

    #[test]
    fn test_unloaded_provider_errors() {
        let provider = InMemoryLocations::new();
        assert!(provider.decode_iata("ALG").is_err());
        assert!(provider.search_by_text("PARIS").is_err());
    }

    #[test]
    fn test_decode_known_code() {
        let lines = seeded().decode_iata("alg").unwrap();
        assert_eq!(lines[0], "DAC ALG");
        assert!(lines.iter().any(|l| l.contains("ALGIERS / ALGERIA")));
        assert!(lines.iter().any(|l| l == "REGION: AFRICA"));
    }

    #[test]
    fn test_decode_unknown_code() {
        assert_eq!(seeded().decode_iata("XXX").unwrap(), ["NO MATCH"]);
    }

    #[test]
    fn test_search_matches_city_substring() {
        let lines = seeded().search_by_text("paris").unwrap();
        assert_eq!(lines[0], "DAN PARIS");
        assert!(lines.iter().any(|l| l.starts_with("PAR ")));
    }
}
