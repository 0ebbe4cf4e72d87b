// Keyslots Key Tracker
// Down state and claim flag for each tracked key role

use crate::config::Role;

/// State of one tracked role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedKey {
    /// Whether the key is physically held
    pub down: bool,
    /// Whether a resolved combo has claimed the current press
    pub action_taken: bool,
}

/// One [`TrackedKey`] per [`Role`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTracker {
    keys: [TrackedKey; 4],
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a down event for `role`.
    ///
    /// Returns `true` on a fresh rising edge, which also resets the claim
    /// flag. Auto-repeat downs while the key is already held return `false`
    /// and change nothing.
    pub fn on_down(&mut self, role: Role) -> bool {
        let key = &mut self.keys[role.index()];
        if key.down {
            return false;
        }
        key.down = true;
        key.action_taken = false;
        true
    }

    /// Record an up event for `role`. The claim flag is left for the caller
    /// to consume.
    pub fn on_up(&mut self, role: Role) {
        self.keys[role.index()].down = false;
    }

    pub fn is_down(&self, role: Role) -> bool {
        self.keys[role.index()].down
    }

    pub fn action_taken(&self, role: Role) -> bool {
        self.keys[role.index()].action_taken
    }

    pub fn mark_action_taken(&mut self, role: Role) {
        self.keys[role.index()].action_taken = true;
    }

    pub fn clear_action_taken(&mut self, role: Role) {
        self.keys[role.index()].action_taken = false;
    }

    /// Either save key is held
    pub fn save_held(&self) -> bool {
        self.is_down(Role::Save1) || self.is_down(Role::Save2)
    }

    /// Snapshot of `role`
    pub fn get(&self, role: Role) -> TrackedKey {
        self.keys[role.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edge_resets_claim() {
        let mut tracker = KeyTracker::new();
        tracker.mark_action_taken(Role::Load);
        assert!(tracker.action_taken(Role::Load));

        assert!(tracker.on_down(Role::Load));
        assert!(tracker.is_down(Role::Load));
        assert!(!tracker.action_taken(Role::Load));
    }

    #[test]
    fn test_repeat_down_is_not_a_rising_edge() {
        let mut tracker = KeyTracker::new();
        assert!(tracker.on_down(Role::Save1));
        tracker.mark_action_taken(Role::Save1);

        assert!(!tracker.on_down(Role::Save1));
        assert!(tracker.action_taken(Role::Save1));
    }

    #[test]
    fn test_up_keeps_claim_until_cleared() {
        let mut tracker = KeyTracker::new();
        tracker.on_down(Role::Save2);
        tracker.mark_action_taken(Role::Save2);
        tracker.on_up(Role::Save2);

        assert!(!tracker.is_down(Role::Save2));
        assert!(tracker.action_taken(Role::Save2));

        tracker.clear_action_taken(Role::Save2);
        assert_eq!(tracker.get(Role::Save2), TrackedKey::default());
    }

    #[test]
    fn test_save_held() {
        let mut tracker = KeyTracker::new();
        assert!(!tracker.save_held());
        tracker.on_down(Role::Save2);
        assert!(tracker.save_held());
        tracker.on_up(Role::Save2);
        tracker.on_down(Role::Load);
        assert!(!tracker.save_held());
    }

    #[test]
    fn test_roles_are_independent() {
        let mut tracker = KeyTracker::new();
        tracker.on_down(Role::Clear);
        assert!(tracker.is_down(Role::Clear));
        assert!(!tracker.is_down(Role::Load));
        assert!(!tracker.is_down(Role::Save1));
    }
}
