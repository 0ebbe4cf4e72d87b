// Keyslots Combo Resolver
// Turns the raw key event stream into combo actions and forwarding decisions
//
// Role keys (save, load, clear) are suppressed as soon as they go down and
// only reach the foreground application again as a replayed tap when their
// press completed no combo. Digits typed under a held modifier never leak.

use strum::IntoEnumIterator;

use crate::config::{Bindings, Role};
use crate::key::slot_digit;
use crate::state::{AccumulationMode, HeldKeys, KeyTracker, SlotAccumulator};
use crate::{Key, KeyEvent, Transition};

use super::action::Action;

/// What happens to the event that was just resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Re-emit the raw event unchanged
    Forward,
    /// Emit nothing
    Suppress,
    /// Emit nothing for this event and synthesize a full tap of the key
    Replay(Key),
}

/// Outcome of one event: a disposition and at most one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub disposition: Disposition,
    pub action: Option<Action>,
}

impl Resolution {
    pub fn forward() -> Self {
        Self {
            disposition: Disposition::Forward,
            action: None,
        }
    }

    pub fn suppress() -> Self {
        Self {
            disposition: Disposition::Suppress,
            action: None,
        }
    }

    pub fn replay(key: Key) -> Self {
        Self {
            disposition: Disposition::Replay(key),
            action: None,
        }
    }

    fn with_action(mut self, action: Option<Action>) -> Self {
        self.action = action;
        self
    }
}

/// Complete resolver state. Idle when no role is down, the accumulator is
/// empty and no suppressed key awaits its release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverState {
    pub tracker: KeyTracker,
    pub accumulator: SlotAccumulator,
    /// Non-role keys whose down was suppressed; their up is suppressed too
    pub suppressed: HeldKeys,
    /// Digit and clear keys whose down was forwarded; they stay ordinary
    /// keys until released
    pub passed: HeldKeys,
}

impl ResolverState {
    pub fn is_idle(&self) -> bool {
        !self.accumulator.is_active()
            && !self.accumulator.clear_submode()
            && self.suppressed.is_empty()
            && Role::iter().all(|role| !self.tracker.is_down(role))
    }

    fn apply(&mut self, bindings: &Bindings, event: KeyEvent) -> Resolution {
        let key = event.key;

        if key == bindings.exit {
            return match event.transition {
                Transition::Down => {
                    self.suppressed.insert(key);
                    Resolution::suppress().with_action(Some(Action::Exit))
                }
                Transition::Up => self.release_other(key),
            };
        }

        if self.passed.contains(key) {
            if event.transition.is_up() {
                self.passed.remove(key);
            }
            return Resolution::forward();
        }

        match (bindings.role_of(key), event.transition) {
            (Some(Role::Clear), Transition::Down) => self.clear_down(key),
            (Some(Role::Clear), Transition::Up) => self.clear_up(),
            (Some(role), Transition::Down) => self.modifier_down(role),
            (Some(role), Transition::Up) => self.modifier_up(bindings, role),
            (None, Transition::Down) => match slot_digit(key) {
                Some(digit) => self.digit_down(key, digit),
                None => Resolution::forward(),
            },
            (None, Transition::Up) => self.release_other(key),
        }
    }

    fn claim_all_modifiers(&mut self) {
        self.tracker.mark_action_taken(Role::Save1);
        self.tracker.mark_action_taken(Role::Save2);
        self.tracker.mark_action_taken(Role::Load);
    }

    /// Save or load key going down.
    fn modifier_down(&mut self, role: Role) -> Resolution {
        if !self.tracker.on_down(role) {
            return Resolution::suppress();
        }

        let action = if self.accumulator.is_active() {
            None
        } else if role.is_save() && self.tracker.is_down(Role::Load) {
            Some(Action::ClearAllSecondary)
        } else if role == Role::Load && self.tracker.save_held() {
            Some(Action::ToggleConsole)
        } else {
            None
        };

        if action.is_some() {
            self.claim_all_modifiers();
        }
        Resolution::suppress().with_action(action)
    }

    /// Save or load key going up: resolve a pending slot action, then replay
    /// the keystroke if nothing claimed this press.
    fn modifier_up(&mut self, bindings: &Bindings, role: Role) -> Resolution {
        if !self.tracker.is_down(role) {
            // Press started before we were listening
            return Resolution::forward();
        }
        self.tracker.on_up(role);

        let action = if role.is_save() {
            match self.accumulator.ready(AccumulationMode::Save) {
                Some(id) if !self.accumulator.clear_submode() => {
                    self.accumulator.reset();
                    self.tracker.mark_action_taken(Role::Save1);
                    self.tracker.mark_action_taken(Role::Save2);
                    Some(Action::Save(id))
                }
                _ => None,
            }
        } else {
            let clear = self.accumulator.clear_submode();
            self.accumulator.ready(AccumulationMode::Load).map(|id| {
                self.accumulator.reset();
                self.tracker.mark_action_taken(Role::Load);
                if clear {
                    Action::ClearSlot(id)
                } else {
                    Action::LoadSlot(id)
                }
            })
        };

        let claimed = self.tracker.action_taken(role);
        self.tracker.clear_action_taken(role);
        let resolution = if claimed {
            Resolution::suppress()
        } else {
            Resolution::replay(bindings.key_for(role))
        };
        resolution.with_action(action)
    }

    fn clear_down(&mut self, key: Key) -> Resolution {
        if self.tracker.is_down(Role::Clear) {
            return Resolution::suppress();
        }
        if self.tracker.is_down(Role::Load) {
            self.tracker.on_down(Role::Clear);
            self.tracker.mark_action_taken(Role::Clear);
            self.accumulator.set_clear_submode(true);
            return Resolution::suppress();
        }
        self.passed.insert(key);
        Resolution::forward()
    }

    /// Submode stays set until a load release resolves a slot or the
    /// accumulator resets.
    fn clear_up(&mut self) -> Resolution {
        if !self.tracker.is_down(Role::Clear) {
            return Resolution::forward();
        }
        self.tracker.on_up(Role::Clear);
        self.tracker.clear_action_taken(Role::Clear);
        Resolution::suppress()
    }

    fn digit_down(&mut self, key: Key, digit: char) -> Resolution {
        if self.tracker.save_held() {
            self.accumulator.push(AccumulationMode::Save, digit);
            self.tracker.mark_action_taken(Role::Save1);
            self.tracker.mark_action_taken(Role::Save2);
        } else if self.tracker.is_down(Role::Load) {
            self.accumulator.push(AccumulationMode::Load, digit);
            self.tracker.mark_action_taken(Role::Load);
        } else {
            self.passed.insert(key);
            return Resolution::forward();
        }
        self.suppressed.insert(key);
        Resolution::suppress()
    }

    fn release_other(&mut self, key: Key) -> Resolution {
        if self.suppressed.remove(key) {
            Resolution::suppress()
        } else {
            Resolution::forward()
        }
    }
}

/// Pure transition: `(state, event) -> (state, resolution)`.
pub fn transition(
    mut state: ResolverState,
    bindings: &Bindings,
    event: KeyEvent,
) -> (ResolverState, Resolution) {
    let resolution = state.apply(bindings, event);
    (state, resolution)
}

/// Resolver instance threaded through the event loop.
#[derive(Debug, Clone)]
pub struct ComboResolver {
    bindings: Bindings,
    state: ResolverState,
}

impl ComboResolver {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            state: ResolverState::default(),
        }
    }

    /// Resolve one event. Events must arrive one at a time in order.
    pub fn handle(&mut self, event: KeyEvent) -> Resolution {
        let resolution = self.state.apply(&self.bindings, event);
        match &resolution.action {
            Some(action) => log::debug!("{} -> {:?}, {}", event, resolution.disposition, action),
            None => log::trace!("{} -> {:?}", event, resolution.disposition),
        }
        resolution
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }
}
