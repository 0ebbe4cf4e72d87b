// Keyslots Action History
// Most-recent-first log of the last few performed actions

use std::collections::VecDeque;
use std::fmt;

/// Number of entries kept.
pub const HISTORY_CAPACITY: usize = 4;

/// Whether an action succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn tag(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Error => "XX",
        }
    }
}

/// One history line, e.g. `OK SAVE --> Slot [3] : "hello"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub status: Status,
    pub message: String,
}

impl HistoryEntry {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.tag(), self.message)
    }
}

/// Ring buffer of [`HistoryEntry`], newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionHistory {
    entries: VecDeque<HistoryEntry>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Add an entry at the front, dropping the oldest when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
