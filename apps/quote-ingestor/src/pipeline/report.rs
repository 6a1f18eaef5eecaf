//! Batch outcome aggregation.

use std::collections::HashMap;

/// Per-symbol outcomes of one batch run, with derived counts.
///
/// Created fresh for every run and handed back to the caller; never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outcomes: HashMap<String, bool>,
}

impl BatchReport {
    /// Build a report from a finished run's outcome map.
    #[must_use]
    pub fn new(outcomes: HashMap<String, bool>) -> Self {
        Self { outcomes }
    }

    /// Per-symbol success flags.
    #[must_use]
    pub fn outcomes(&self) -> &HashMap<String, bool> {
        &self.outcomes
    }

    /// Outcome for one symbol, if it was part of the run.
    #[must_use]
    pub fn outcome(&self, symbol: &str) -> Option<bool> {
        self.outcomes.get(symbol).copied()
    }

    /// Number of symbols processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of symbols that succeeded.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.values().filter(|ok| **ok).count()
    }

    /// Number of symbols that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Fraction of symbols that succeeded, as a percentage. Zero for an
    /// empty run.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        (self.succeeded() as f64 / self.total() as f64) * 100.0
    }

    /// Whether no symbol in the run succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.succeeded() == 0
    }

    /// Human-readable run summary for the external scheduler.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "processed {} symbols: {} succeeded, {} failed ({:.2}% success rate)",
            self.total(),
            self.succeeded(),
            self.failed(),
            self.success_rate()
        )
    }
}
