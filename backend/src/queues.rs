//! Queue store
//!
//! Named FIFO lists of record locators. Placement is idempotent (a locator
//! appears at most once per queue, insertion order otherwise preserved);
//! listing paginates once a queue exceeds one page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entries shown per page when displaying a queue.
pub const QUEUE_PAGE_SIZE: usize = 5;

/// All queues of a session, keyed by upper-cased queue identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueStore {
    queues: BTreeMap<String, Vec<String>>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn canonical(name: &str) -> String {
        name.trim().to_uppercase()
    }

    /// Whether the queue exists (it may still be empty).
    pub fn contains(&self, name: &str) -> bool {
        self.queues.contains_key(&Self::canonical(name))
    }

    /// Append a locator, creating the queue on first use. Returns false if
    /// the locator was already queued (placement is idempotent).
    pub fn add(&mut self, name: &str, locator: &str) -> bool {
        let locator = locator.to_uppercase();
        let entries = self.queues.entry(Self::canonical(name)).or_default();
        if entries.contains(&locator) {
            return false;
        }
        entries.push(locator);
        true
    }

    /// Locators in a queue, in placement order. `None` for unknown queues.
    pub fn entries(&self, name: &str) -> Option<&[String]> {
        self.queues
            .get(&Self::canonical(name))
            .map(Vec::as_slice)
    }

    /// First locator without removing it.
    pub fn peek(&self, name: &str) -> Option<&str> {
        self.entries(name)?.first().map(String::as_str)
    }

    /// Pop the first locator of a queue.
    pub fn pop_front(&mut self, name: &str) -> Option<String> {
        let entries = self.queues.get_mut(&Self::canonical(name))?;
        if entries.is_empty() {
            None
        } else {
            Some(entries.remove(0))
        }
    }

    /// Queue names with their current lengths, in name order.
    pub fn summary(&self) -> Vec<(String, usize)> {
        self.queues
            .iter()
            .map(|(name, entries)| (name.clone(), entries.len()))
            .collect()
    }
}
