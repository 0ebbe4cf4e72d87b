// Keyslots uinput Output Layer
// Virtual keyboard that re-emits forwarded events and replays taps

use std::time::Duration;

use evdev::uinput::VirtualDeviceBuilder;
use evdev::{AttributeSet, EventType, InputEvent};

use crate::event::PolledEvent;
use crate::input::VIRTUAL_DEVICE_NAME;
use crate::state::HeldKeys;
use crate::transform::Disposition;
use crate::Key;

/// Error types for uinput operations
#[derive(Debug, thiserror::Error)]
pub enum UInputError {
    #[error("Failed to create virtual device: {0}")]
    DeviceCreation(String),

    #[error("Failed to write event: {0}")]
    WriteError(String),
}

/// Virtual uinput keyboard.
///
/// Tracks which keys it currently holds so they can all be released on
/// shutdown.
pub struct VirtualDevice {
    device: evdev::uinput::VirtualDevice,
    pressed: HeldKeys,
    key_delay: Duration,
}

impl VirtualDevice {
    /// Create a new virtual uinput device
    pub fn new() -> Result<Self, UInputError> {
        let mut keys = AttributeSet::new();
        for code in 0..256u16 {
            keys.insert(evdev::Key::new(code));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .name(VIRTUAL_DEVICE_NAME)
            .with_keys(&keys)
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?
            .build()
            .map_err(|e: std::io::Error| UInputError::DeviceCreation(e.to_string()))?;

        Ok(Self {
            device,
            pressed: HeldKeys::new(),
            key_delay: Duration::ZERO,
        })
    }

    /// Pause before and after each synthesized event.
    pub fn set_key_delay_ms(&mut self, delay_ms: u64) {
        self.key_delay = Duration::from_millis(delay_ms);
    }

    fn emit(&mut self, code: u16, value: i32) -> Result<(), UInputError> {
        let key_event = InputEvent::new(EventType::KEY, code, value);
        // SYN event is required for the kernel to process the key event
        let syn_event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);
        self.device
            .emit(&[key_event, syn_event])
            .map_err(|e: std::io::Error| UInputError::WriteError(e.to_string()))?;

        let key = Key::from(code);
        match value {
            1 => self.pressed.insert(key),
            0 => {
                self.pressed.remove(key);
            }
            _ => {}
        }
        Ok(())
    }

    /// Re-emit a grabbed event unchanged.
    pub fn forward(&mut self, raw: &InputEvent) -> Result<(), UInputError> {
        self.emit(raw.code(), raw.value())
    }

    /// Synthesize a full press and release of `key`.
    pub fn tap(&mut self, key: Key) -> Result<(), UInputError> {
        for value in [1, 0] {
            if !self.key_delay.is_zero() {
                std::thread::sleep(self.key_delay);
            }
            self.emit(key.code(), value)?;
        }
        if !self.key_delay.is_zero() {
            std::thread::sleep(self.key_delay);
        }
        Ok(())
    }

    /// Carry out the resolver's decision for one event.
    pub fn dispatch(&mut self, event: &PolledEvent, disposition: Disposition) -> Result<(), UInputError> {
        match disposition {
            Disposition::Forward => self.forward(&event.raw),
            Disposition::Suppress => Ok(()),
            Disposition::Replay(key) => {
                log::debug!("Replaying {}", key);
                self.tap(key)
            }
        }
    }

    /// Release all held keys, most recent first.
    pub fn release_all(&mut self) -> Result<(), UInputError> {
        for key in self.pressed.drain_newest_first() {
            self.emit(key.code(), 0)?;
        }
        Ok(())
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    pub fn pressed_key_count(&self) -> usize {
        self.pressed.len()
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        if let Err(e) = self.release_all() {
            log::warn!("Failed to release held keys: {}", e);
        }
    }
}
