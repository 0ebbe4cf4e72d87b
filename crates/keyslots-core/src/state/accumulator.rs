// Keyslots Slot Accumulator
// Digit buffer that forms a slot id while a modifier is held

use std::fmt;

use crate::store::SlotId;

/// Which modifier started the current accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccumulationMode {
    Save,
    Load,
}

impl fmt::Display for AccumulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulationMode::Save => write!(f, "save"),
            AccumulationMode::Load => write!(f, "load"),
        }
    }
}

/// Transient slot-id buffer owned by the combo resolver.
///
/// The clear submode flag lives here too so that a single [`reset`]
/// returns every piece of gesture state to idle at once.
///
/// [`reset`]: SlotAccumulator::reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotAccumulator {
    mode: Option<AccumulationMode>,
    digits: String,
    clear_submode: bool,
}

impl SlotAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<AccumulationMode> {
        self.mode
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn clear_submode(&self) -> bool {
        self.clear_submode
    }

    pub fn set_clear_submode(&mut self, on: bool) {
        self.clear_submode = on;
    }

    /// Start accumulating in `mode`, or append to the running id. The mode
    /// follows the modifier that typed the latest digit.
    pub fn push(&mut self, mode: AccumulationMode, digit: char) {
        self.mode = Some(mode);
        self.digits.push(digit);
    }

    /// Finalize the digits typed so far if accumulating in `mode`.
    pub fn ready(&self, mode: AccumulationMode) -> Option<SlotId> {
        if self.mode == Some(mode) && !self.digits.is_empty() {
            Some(SlotId::finalize(&self.digits))
        } else {
            None
        }
    }

    /// Return to idle: no mode, no digits, no clear submode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
