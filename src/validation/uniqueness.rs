//! Uniqueness Tracker
//!
//! Per-call record of values already seen in unique-flagged columns.
//! A tracker is created for each validation and dropped with it.

use std::collections::{HashMap, HashSet};

/// Case-insensitive seen-value sets, one per column
#[derive(Debug, Default)]
pub struct UniquenessTracker {
    seen: HashMap<String, HashSet<String>>,
}

impl UniquenessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a column.
    ///
    /// Returns `false` if an equal value (ignoring case) was already
    /// recorded for that column.
    pub fn record(&mut self, column: &str, value: &str) -> bool {
        let key = value.to_uppercase();
        match self.seen.get_mut(column) {
            Some(values) => values.insert(key),
            None => {
                self.seen
                    .insert(column.to_string(), HashSet::from([key]));
                true
            }
        }
    }
}
