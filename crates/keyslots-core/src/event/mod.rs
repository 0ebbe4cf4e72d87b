// Keyslots Event Handling
// evdev event source

pub mod r#loop;

pub use evdev::InputEvent;
pub use r#loop::{key_event, DeviceInfo, EventLoop, EventLoopError, EventLoopResult, PolledEvent};
