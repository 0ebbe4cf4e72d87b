// Keyslots Core Library
// Combo resolution and slot persistence for keyboard clipboard slots

pub mod clipboard;
pub mod config;
pub mod display;
pub mod executor;
pub mod history;
pub mod key;
pub mod keycode;
pub mod state;
pub mod store;
pub mod transform;
pub mod transition;

#[cfg(feature = "runtime")]
pub mod settings;

#[cfg(feature = "runtime")]
pub mod input;

#[cfg(feature = "runtime")]
pub mod event;

#[cfg(feature = "runtime")]
pub mod output;

pub use clipboard::ClipboardAccess;
pub use config::{parse_key_spec, Bindings, ConfigParseError, Configuration, Role, SlotLabels};
pub use display::DisplayLog;
pub use executor::{ActionExecutor, Flow};
pub use history::{ActionHistory, HistoryEntry, Status};
pub use key::Key;
pub use keycode::KeyCode;
pub use state::{HeldKeys, KeyTracker, SlotAccumulator};
pub use store::{ClearOutcome, InitOutcome, SlotId, SlotRecord, SlotStore, StoreError};
pub use transform::{Action, ComboResolver, Disposition, Resolution};
pub use transition::{KeyEvent, Transition};

#[cfg(feature = "runtime")]
pub use clipboard::SystemClipboard;
#[cfg(feature = "runtime")]
pub use event::{EventLoop, EventLoopError, EventLoopResult};
#[cfg(feature = "runtime")]
pub use output::{UInputError, VirtualDevice};
#[cfg(feature = "runtime")]
pub use settings::{Settings, SettingsError};
