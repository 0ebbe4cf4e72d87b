use std::fmt;

use crate::Key;

/// Direction of a key event as seen by the resolver.
///
/// From `evtest` output, the "magic numbers" delivered by evdev are:
///   0 == 'released'
///   1 == 'pressed'
///   2 == 'repeated'
///
/// Auto-repeat is folded into `Down`; the key tracker tells a fresh press
/// from a repeat by checking whether the key is already down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Down,
    Up,
}

impl Transition {
    /// Create a Transition from an evdev event value
    pub fn from_evdev_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Transition::Up),
            1 | 2 => Some(Transition::Down),
            _ => None,
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, Transition::Down)
    }

    pub fn is_up(self) -> bool {
        matches!(self, Transition::Up)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Down => write!(f, "down"),
            Transition::Up => write!(f, "up"),
        }
    }
}

/// A single key event delivered by the key event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub transition: Transition,
}

impl KeyEvent {
    pub fn new(key: Key, transition: Transition) -> Self {
        Self { key, transition }
    }

    pub fn down(key: Key) -> Self {
        Self::new(key, Transition::Down)
    }

    pub fn up(key: Key) -> Self {
        Self::new(key, Transition::Up)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.transition)
    }
}
