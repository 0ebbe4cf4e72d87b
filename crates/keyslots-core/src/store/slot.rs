// Keyslots Slot Identity
// Canonical slot ids, primary range and store ordering

use std::cmp::Ordering;
use std::fmt;

use crate::config::PRIMARY_SLOT_COUNT;

/// Canonical slot identifier.
///
/// Ids are kept verbatim (`"05"` and `"5"` are different slots); only the
/// lone digit `"0"` is canonicalized, to `"10"`, by [`SlotId::finalize`].
///
/// Ordering is the store order: primary slots `1..10` by number, then
/// all-digit ids by numeric value, then every other id lexicographically.
/// Ties in numeric value fall back to the text so distinct ids never
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Turn accumulated digits into a slot id.
    pub fn finalize(digits: &str) -> Self {
        if digits == "0" {
            Self::new("10")
        } else {
            Self::new(digits)
        }
    }

    /// Primary slot `number` (1..=10)
    pub fn primary(number: usize) -> Self {
        debug_assert!((1..=PRIMARY_SLOT_COUNT).contains(&number));
        Self(number.to_string())
    }

    /// The ten primary ids in order
    pub fn primaries() -> impl Iterator<Item = SlotId> {
        (1..=PRIMARY_SLOT_COUNT).map(SlotId::primary)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of the primary slot this id names, if any.
    pub fn primary_number(&self) -> Option<usize> {
        match self.0.as_str() {
            "10" => Some(10),
            s if s.len() == 1 => s.parse::<usize>().ok().filter(|n| *n >= 1),
            _ => None,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.primary_number().is_some()
    }

    fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    fn rank(&self) -> u8 {
        if self.is_primary() {
            0
        } else if self.is_numeric() {
            1
        } else {
            2
        }
    }
}

/// Compare two all-digit strings by value without overflowing.
fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for SlotId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match self.rank() {
            0 => self.primary_number().cmp(&other.primary_number()),
            1 => numeric_cmp(&self.0, &other.0).then_with(|| self.0.cmp(&other.0)),
            _ => self.0.cmp(&other.0),
        })
    }
}

impl PartialOrd for SlotId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SlotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SlotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A slot as listed from the store, with its content decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRecord {
    pub id: SlotId,
    pub content: String,
    pub is_primary: bool,
}

impl SlotRecord {
    pub fn new(id: SlotId, content: String) -> Self {
        let is_primary = id.is_primary();
        Self {
            id,
            content,
            is_primary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
