//! Bounded, newest-first review buffer shared by the feed and the trigger.

use std::collections::VecDeque;

use crate::types::ReviewEntry;

/// Maximum number of reviews retained. Older entries are dropped first.
pub const MAX_REVIEWS: usize = 50;

/// Insertion-ordered review buffer, newest entry at index 0.
///
/// Invariant: `len() <= capacity`. Entries are never edited in place.
#[derive(Debug, Clone)]
pub struct ReviewLog {
    entries: VecDeque<ReviewEntry>,
    capacity: usize,
}

impl Default for ReviewLog {
    fn default() -> Self {
        Self::with_capacity(MAX_REVIEWS)
    }
}

impl ReviewLog {
    /// Creates an empty log holding at most `capacity` entries.
    ///
    /// A zero capacity is bumped to 1 so a freshly pushed entry is always visible.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Prepends `entry` and trims the oldest entries past capacity.
    pub fn push(&mut self, entry: ReviewEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Replaces the whole log with `entries`, given newest-first.
    pub fn replace(&mut self, entries: impl IntoIterator<Item = ReviewEntry>) {
        self.entries = entries.into_iter().take(self.capacity).collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &ReviewEntry> {
        self.entries.iter()
    }

    /// Serializes every entry as `[SOURCE] text`, newline-joined, newest-first.
    pub fn to_payload(&self) -> String {
        self.entries
            .iter()
            .map(ReviewEntry::payload_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
