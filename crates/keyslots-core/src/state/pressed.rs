// Keyslots Held Key Set
// Keys currently held down, in press order

use smallvec::SmallVec;

use crate::Key;

/// A handful of held keys, oldest press first.
///
/// The resolver keeps one for keys whose down was suppressed and one for
/// keys whose down was passed through; the virtual device keeps one for the
/// keys it is holding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: SmallVec<[Key; 8]>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as held. No-op when it already is.
    pub fn insert(&mut self, key: Key) {
        if !self.contains(key) {
            self.keys.push(key);
        }
    }

    /// Forget `key`; returns whether it was held.
    pub fn remove(&mut self, key: Key) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        self.keys.len() != before
    }

    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Empty the set, most recent press first.
    pub fn drain_newest_first(&mut self) -> Vec<Key> {
        self.keys.drain(..).rev().collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAVE: Key = Key(39);
    const DIGIT_4: Key = Key(5);

    #[test]
    fn test_insert_is_idempotent() {
        let mut held = HeldKeys::new();
        held.insert(SAVE);
        held.insert(SAVE);
        assert_eq!(held.len(), 1);
        assert!(held.contains(SAVE));
    }

    #[test]
    fn test_remove_reports_membership() {
        let mut held = HeldKeys::new();
        held.insert(DIGIT_4);
        assert!(held.remove(DIGIT_4));
        assert!(!held.remove(DIGIT_4));
        assert!(held.is_empty());
    }

    #[test]
    fn test_drain_releases_newest_first() {
        let mut held = HeldKeys::new();
        for key in [Key(42), SAVE, DIGIT_4] {
            held.insert(key);
        }
        held.remove(SAVE);

        assert_eq!(held.drain_newest_first(), vec![DIGIT_4, Key(42)]);
        assert!(held.is_empty());
    }
}
