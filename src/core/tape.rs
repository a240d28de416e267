//! The tape: an append-only log of completed operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One completed operation as it appears on the tape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// Formatted description, e.g. `"1 + 2 = 3"`
    pub text: String,
    /// When the operation completed
    pub recorded_at: DateTime<Utc>,
}

impl TapeEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for TapeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered log of tape entries, newest last.
///
/// # Example
///
/// ```rust
/// use tapecalc::core::{Tape, TapeEntry};
///
/// let mut tape = Tape::new();
/// tape.record(TapeEntry::new("1 + 2 = 3"));
/// tape.record(TapeEntry::new("√(9) = 3"));
///
/// assert_eq!(tape.texts(), vec!["1 + 2 = 3", "√(9) = 3"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tape {
    entries: Vec<TapeEntry>,
}

impl Tape {
    /// Create a new empty tape.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn record(&mut self, entry: TapeEntry) {
        tracing::trace!(entry = %entry.text, "Tape entry recorded");
        self.entries.push(entry);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get all entries in insertion order.
    pub fn entries(&self) -> &[TapeEntry] {
        &self.entries
    }

    /// Entry texts in insertion order.
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time between the first and last entry, `None` when empty.
    pub fn span(&self) -> Option<std::time::Duration> {
        let (first, last) = (self.entries.first()?, self.entries.last()?);
        last.recorded_at
            .signed_duration_since(first.recorded_at)
            .to_std()
            .ok()
    }
}
