//! Request outcome statistics.
//!
//! Thread-safe counters shared by all request handlers. These are process-wide
//! observability counters only; no extraction state is ever shared between
//! requests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::OutcomeType;

/// Thread-safe request outcome tracker.
///
/// All outcome types are initialized to zero on creation, so the map is never
/// mutated structurally afterwards and can be shared via `Arc`.
pub struct RequestStats {
    outcomes: HashMap<OutcomeType, AtomicUsize>,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStats {
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in OutcomeType::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }
        RequestStats { outcomes }
    }

    /// Increment an outcome counter.
    pub fn increment(&self, outcome: OutcomeType) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map. \
                 This indicates a bug in RequestStats initialization.",
                outcome
            );
        }
    }

    /// Get the count for an outcome type.
    pub fn get_count(&self, outcome: OutcomeType) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of requests counted.
    pub fn total(&self) -> usize {
        OutcomeType::iter().map(|o| self.get_count(o)).sum()
    }

    /// Requests that produced a 200 response.
    pub fn total_successes(&self) -> usize {
        OutcomeType::iter()
            .filter(OutcomeType::is_success)
            .map(|o| self.get_count(o))
            .sum()
    }

    /// Point-in-time copy keyed by [`OutcomeType::as_str`], in stable order.
    pub fn snapshot(&self) -> BTreeMap<&'static str, usize> {
        OutcomeType::iter()
            .map(|o| (o.as_str(), self.get_count(o)))
            .collect()
    }
}
