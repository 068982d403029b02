//! Bounded ring buffer of recent log lines.
//!
//! Backs the debug overlay toggled from the dashboard. Owned entirely by
//! the presentation layer; the normalizer and generator never write here.

use std::collections::VecDeque;

/// Capped buffer of the most recent log entries.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLog {
    capacity: usize,
    entries: VecDeque<String>,
}

impl DebugLog {
    /// Create a buffer holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    /// Most recent entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
