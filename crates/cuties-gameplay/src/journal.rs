//! Narrative log shown to the player.
//!
//! Entries are kept newest-first and the oldest fall off once the journal
//! holds [`JOURNAL_CAPACITY`] entries.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of entries retained.
pub const JOURNAL_CAPACITY: usize = 30;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Current wall-clock time as a [`Timestamp`]. Clocks set before 1970 read as 0.
#[must_use]
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// One line of the narrative log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was written
    pub timestamp: Timestamp,
    /// Human-readable text
    pub message: String,
}

/// Bounded, newest-first narrative log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    entries: VecDeque<LogEntry>,
    /// Entries ever written, evicted ones included
    #[serde(default)]
    recorded: u64,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a journal holding a single entry.
    #[must_use]
    pub fn with_entry(timestamp: Timestamp, message: impl Into<String>) -> Self {
        let mut journal = Self::new();
        journal.record(timestamp, message);
        journal
    }

    /// Prepends an entry, evicting the oldest past capacity.
    pub fn record(&mut self, timestamp: Timestamp, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            timestamp,
            message: message.into(),
        });
        self.entries.truncate(JOURNAL_CAPACITY);
        self.recorded = self.recorded.saturating_add(1);
    }

    /// Entries ever written to this journal, evicted ones included.
    #[must_use]
    pub const fn recorded(&self) -> u64 {
        self.recorded
    }

    /// Entries written after `earlier`, newest first.
    ///
    /// A journal that did not grow out of `earlier` (after a reset) yields
    /// everything it holds.
    pub fn since<'a>(&'a self, earlier: &Self) -> impl Iterator<Item = &'a LogEntry> + 'a {
        let fresh = if self == earlier {
            0
        } else if self.recorded > earlier.recorded {
            usize::try_from(self.recorded - earlier.recorded).unwrap_or(usize::MAX)
        } else {
            self.entries.len()
        };
        self.entries.iter().take(fresh)
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the journal is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Entry at `index`, 0 being the newest.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Entries newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// Messages newest-first.
    pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.message.as_str())
    }
}
