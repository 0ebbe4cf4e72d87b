// Keyslots Action Executor
// Applies resolved actions to the slot store and the clipboard

use crate::clipboard::ClipboardAccess;
use crate::display::{preview, DisplayLog, HISTORY_PREVIEW_CHARS};
use crate::history::{ActionHistory, HistoryEntry};
use crate::store::{ClearOutcome, SlotId, SlotStore, StoreError};
use crate::transform::Action;

/// Whether the event loop keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Owns the store, the clipboard and the action history.
pub struct ActionExecutor<C: ClipboardAccess> {
    store: SlotStore,
    clipboard: C,
    history: ActionHistory,
}

impl<C: ClipboardAccess> ActionExecutor<C> {
    pub fn new(store: SlotStore, clipboard: C) -> Self {
        Self {
            store,
            clipboard,
            history: ActionHistory::new(),
        }
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    /// Perform `action`, record its outcome and refresh the display.
    pub fn execute(&mut self, action: &Action, display: &mut impl DisplayLog) -> Flow {
        let entry = match action {
            Action::Exit => {
                log::info!("Termination key pressed");
                return Flow::Exit;
            }
            Action::ToggleConsole => {
                let visible = !display.is_visible();
                display.set_visible(visible);
                log::debug!("Console {}", if visible { "shown" } else { "hidden" });
                self.refresh(display);
                return Flow::Continue;
            }
            Action::Save(id) => self.save(id),
            Action::LoadSlot(id) => self.load(id),
            Action::ClearSlot(id) => self.clear(id),
            Action::ClearAllSecondary => self.clear_all(),
        };

        if entry.is_error() {
            log::warn!("{}", entry);
        } else {
            log::info!("{}", entry);
        }
        self.history.push(entry);
        self.refresh(display);
        Flow::Continue
    }

    /// Redraw the display if it is visible.
    pub fn refresh(&self, display: &mut impl DisplayLog) {
        if !display.is_visible() {
            return;
        }
        let labels = &self.store.config().slot_labels;
        match self.store.list_slots() {
            Ok(slots) => display.render(&self.history, Some(&slots), labels),
            Err(e) => {
                log::error!("{}", e);
                display.render(&self.history, None, labels);
            }
        }
    }

    fn save(&mut self, id: &SlotId) -> HistoryEntry {
        let text = self.clipboard.get_text();
        match self.store.write_slot(id, &text) {
            Ok(()) => HistoryEntry::ok(format!(
                "SAVE --> Slot [{}] : \"{}\"",
                id,
                preview(&text, HISTORY_PREVIEW_CHARS)
            )),
            Err(e) => {
                log::error!("{}", e);
                HistoryEntry::error(format!("ERROR --> Slot [{}] could not be saved", id))
            }
        }
    }

    fn load(&mut self, id: &SlotId) -> HistoryEntry {
        let content = match self.store.read_slot(id) {
            Ok(content) => content,
            Err(e) => return store_unavailable(e),
        };
        if content.is_empty() {
            return HistoryEntry::error(format!("ERROR --> Slot [{}] is EMPTY", id));
        }
        if !self.clipboard.set_text(&content) {
            return HistoryEntry::error(format!(
                "ERROR --> Slot [{}] could not be copied to the clipboard",
                id
            ));
        }
        HistoryEntry::ok(format!(
            "LOAD <-- Slot [{}] : \"{}\"",
            id,
            preview(&content, HISTORY_PREVIEW_CHARS)
        ))
    }

    fn clear(&mut self, id: &SlotId) -> HistoryEntry {
        match self.store.clear_slot(id) {
            Ok(ClearOutcome::Emptied) => HistoryEntry::ok(format!("CLEAR --> Slot [{}] emptied", id)),
            Ok(ClearOutcome::Deleted) => HistoryEntry::ok(format!("DELETE --> Slot [{}] deleted", id)),
            Ok(ClearOutcome::NotFound) => HistoryEntry::error(format!("ERROR --> Slot [{}] not found", id)),
            Err(e) => store_unavailable(e),
        }
    }

    fn clear_all(&mut self) -> HistoryEntry {
        match self.store.clear_all_secondary() {
            Ok(removed) => {
                log::debug!("Removed {} secondary slots", removed);
                HistoryEntry::ok("CLEAR --> All additional slots deleted")
            }
            Err(e) => store_unavailable(e),
        }
    }
}

fn store_unavailable(e: StoreError) -> HistoryEntry {
    log::error!("{}", e);
    HistoryEntry::error(format!("ERROR --> Store unavailable: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlotLabels;
    use crate::store::SlotRecord;

    #[derive(Default)]
    struct FakeClipboard {
        text: String,
        fail_writes: bool,
    }

    impl ClipboardAccess for FakeClipboard {
        fn get_text(&mut self) -> String {
            self.text.clone()
        }

        fn set_text(&mut self, text: &str) -> bool {
            if self.fail_writes {
                return false;
            }
            self.text = text.to_string();
            true
        }
    }

    #[derive(Default)]
    struct CountingDisplay {
        visible: bool,
        renders: usize,
    }

    impl DisplayLog for CountingDisplay {
        fn is_visible(&self) -> bool {
            self.visible
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn render(&mut self, _: &ActionHistory, _: Option<&[SlotRecord]>, _: &SlotLabels) {
            self.renders += 1;
        }
    }

    fn executor(dir: &tempfile::TempDir) -> ActionExecutor<FakeClipboard> {
        let mut store = SlotStore::new(dir.path().join("slots.dat"));
        store.initialize().unwrap();
        ActionExecutor::new(store, FakeClipboard::default())
    }

    fn latest(exec: &ActionExecutor<FakeClipboard>) -> String {
        exec.history().latest().map(ToString::to_string).unwrap_or_default()
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut exec = executor(&dir);
        let mut display = CountingDisplay::default();

        exec.clipboard_mut().text = "line one\nline two".to_string();
        exec.execute(&Action::Save(SlotId::from("7")), &mut display);
        assert_eq!(latest(&exec), "OK SAVE --> Slot [7] : \"line one line two\"");

        exec.clipboard_mut().text.clear();
        exec.execute(&Action::LoadSlot(SlotId::from("7")), &mut display);
        assert_eq!(exec.clipboard().text, "line one\nline two");
        assert_eq!(latest(&exec), "OK LOAD <-- Slot [7] : \"line one line two\"");
        assert_eq!(display.renders, 0);
    }

    #[test]
    fn test_load_empty_and_clipboard_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut exec = executor(&dir);
        let mut display = CountingDisplay::default();

        exec.execute(&Action::LoadSlot(SlotId::from("3")), &mut display);
        assert_eq!(latest(&exec), "XX ERROR --> Slot [3] is EMPTY");

        exec.store().write_slot(&SlotId::from("3"), "x").unwrap();
        exec.clipboard_mut().fail_writes = true;
        exec.execute(&Action::LoadSlot(SlotId::from("3")), &mut display);
        assert_eq!(latest(&exec), "XX ERROR --> Slot [3] could not be copied to the clipboard");
    }

    #[test]
    fn test_clear_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut exec = executor(&dir);
        let mut display = CountingDisplay::default();
        exec.store().write_slot(&SlotId::from("55"), "x").unwrap();

        exec.execute(&Action::ClearSlot(SlotId::from("2")), &mut display);
        assert_eq!(latest(&exec), "OK CLEAR --> Slot [2] emptied");
        exec.execute(&Action::ClearSlot(SlotId::from("55")), &mut display);
        assert_eq!(latest(&exec), "OK DELETE --> Slot [55] deleted");
        exec.execute(&Action::ClearSlot(SlotId::from("55")), &mut display);
        assert_eq!(latest(&exec), "XX ERROR --> Slot [55] not found");
        exec.execute(&Action::ClearAllSecondary, &mut display);
        assert_eq!(latest(&exec), "OK CLEAR --> All additional slots deleted");
    }

    #[test]
    fn test_store_failure_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut exec = executor(&dir);
        let mut display = CountingDisplay::default();
        std::fs::remove_file(exec.store().path()).unwrap();

        exec.execute(&Action::Save(SlotId::from("1")), &mut display);
        assert_eq!(latest(&exec), "XX ERROR --> Slot [1] could not be saved");
        exec.execute(&Action::LoadSlot(SlotId::from("1")), &mut display);
        assert!(latest(&exec).starts_with("XX ERROR --> Store unavailable: "));
    }

    #[test]
    fn test_toggle_and_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut exec = executor(&dir);
        let mut display = CountingDisplay::default();

        assert_eq!(exec.execute(&Action::ToggleConsole, &mut display), Flow::Continue);
        assert!(display.visible);
        assert_eq!(display.renders, 1);
        exec.execute(&Action::ClearAllSecondary, &mut display);
        assert_eq!(display.renders, 2);
        exec.execute(&Action::ToggleConsole, &mut display);
        assert!(!display.visible);
        assert_eq!(display.renders, 2);

        assert_eq!(exec.execute(&Action::Exit, &mut display), Flow::Exit);
        assert!(exec.history().len() == 1);
    }
}
