// Keyslots Clipboard
// Clipboard access used by the action executor

/// System clipboard as seen by the executor.
///
/// Failures never propagate: an unreadable clipboard reads as empty text,
/// and a failed write reports `false`.
pub trait ClipboardAccess {
    fn get_text(&mut self) -> String;
    fn set_text(&mut self, text: &str) -> bool;
}

#[cfg(feature = "runtime")]
pub use system::SystemClipboard;

#[cfg(feature = "runtime")]
mod system {
    use arboard::Clipboard;

    use super::ClipboardAccess;

    /// arboard-backed clipboard.
    ///
    /// The handle is kept open between calls because on X11 the owner of
    /// the selection must stay alive to serve pasted text. It is reopened
    /// after any failure.
    #[derive(Default)]
    pub struct SystemClipboard {
        handle: Option<Clipboard>,
    }

    impl SystemClipboard {
        pub fn new() -> Self {
            Self::default()
        }

        fn handle(&mut self) -> Option<&mut Clipboard> {
            if self.handle.is_none() {
                match Clipboard::new() {
                    Ok(clipboard) => self.handle = Some(clipboard),
                    Err(e) => {
                        log::warn!("Clipboard unavailable: {}", e);
                        return None;
                    }
                }
            }
            self.handle.as_mut()
        }
    }

    impl ClipboardAccess for SystemClipboard {
        fn get_text(&mut self) -> String {
            let Some(clipboard) = self.handle() else {
                return String::new();
            };
            match clipboard.get_text() {
                Ok(text) => text,
                Err(arboard::Error::ContentNotAvailable) => String::new(),
                Err(e) => {
                    log::warn!("Failed to read clipboard: {}", e);
                    self.handle = None;
                    String::new()
                }
            }
        }

        fn set_text(&mut self, text: &str) -> bool {
            let Some(clipboard) = self.handle() else {
                return false;
            };
            match clipboard.set_text(text) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Failed to write clipboard: {}", e);
                    self.handle = None;
                    false
                }
            }
        }
    }
}
