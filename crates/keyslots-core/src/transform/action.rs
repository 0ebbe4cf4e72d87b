// Keyslots Actions
// What a completed combo asks the executor to do

use std::fmt;

use crate::store::SlotId;

/// A user action resolved from a combo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Termination key: stop the event loop
    Exit,
    /// Save + Load together: delete every secondary slot
    ClearAllSecondary,
    /// Load + Save together: show or hide the status display
    ToggleConsole,
    /// Clipboard text into the slot
    Save(SlotId),
    /// Slot content onto the clipboard
    LoadSlot(SlotId),
    /// Empty a primary slot, delete a secondary one
    ClearSlot(SlotId),
}

impl Action {
    /// Slot the action targets, if any
    pub fn slot(&self) -> Option<&SlotId> {
        match self {
            Action::Save(id) | Action::LoadSlot(id) | Action::ClearSlot(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Exit => write!(f, "exit"),
            Action::ClearAllSecondary => write!(f, "clear all secondary slots"),
            Action::ToggleConsole => write!(f, "toggle console"),
            Action::Save(id) => write!(f, "save [{}]", id),
            Action::LoadSlot(id) => write!(f, "load [{}]", id),
            Action::ClearSlot(id) => write!(f, "clear [{}]", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_accessor() {
        assert_eq!(Action::Save(SlotId::from("3")).slot(), Some(&SlotId::from("3")));
        assert_eq!(Action::ClearSlot(SlotId::from("44")).slot(), Some(&SlotId::from("44")));
        assert_eq!(Action::ToggleConsole.slot(), None);
        assert_eq!(Action::Exit.slot(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::LoadSlot(SlotId::from("10")).to_string(), "load [10]");
        assert_eq!(Action::ClearAllSecondary.to_string(), "clear all secondary slots");
    }
}
