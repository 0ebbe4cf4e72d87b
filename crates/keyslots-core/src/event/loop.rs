// Keyslots Event Loop
// Grabs the keyboards and delivers their key events one at a time

use std::os::unix::io::AsRawFd;

use evdev::{Device, EventType, InputEvent};

use crate::input::{DeviceCapabilities, DeviceFilter};
use crate::{Key, KeyEvent, Transition};

/// Result type for event loop operations
pub type EventLoopResult<T> = Result<T, EventLoopError>;

/// Errors that can occur in event loop
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Cannot grab {device}: {source}")]
    Grab {
        device: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device information for listing devices
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub path: Option<String>,
}

/// Key event as read from a grabbed device.
///
/// The raw event is kept so that forwarded events are re-emitted with their
/// original value (press, release or repeat).
#[derive(Debug, Clone, Copy)]
pub struct PolledEvent {
    pub raw: InputEvent,
    pub key: KeyEvent,
}

/// Translate a raw evdev event; `None` for anything but key events.
pub fn key_event(event: &InputEvent) -> Option<KeyEvent> {
    if event.event_type() != EventType::KEY {
        return None;
    }
    let transition = Transition::from_evdev_value(event.value())?;
    Some(KeyEvent::new(Key::from(event.code()), transition))
}

fn capabilities(device: &Device) -> DeviceCapabilities {
    let has_ev_key = device.supported_events().contains(EventType::KEY);
    let supported_keys = device
        .supported_keys()
        .map(|keys| keys.iter().map(|k| k.code()).collect())
        .unwrap_or_default();
    DeviceCapabilities::new(has_ev_key, supported_keys)
}

/// Grabbed input devices, polled together.
///
/// While grabbed, no other consumer sees the keyboards' events; everything
/// that should reach applications is re-emitted on the virtual device.
pub struct EventLoop {
    devices: Vec<Device>,
    names: Vec<String>,
    poll_fds: Vec<libc::pollfd>,
    grabbed: bool,
}

impl EventLoop {
    /// Open and grab every device the filter accepts.
    pub fn new_with_grab(filter: &DeviceFilter) -> EventLoopResult<Self> {
        let mut devices = Self::find_devices(filter)?;

        // A previous instance may have crashed while holding the grab
        for (_, device) in &mut devices {
            let _ = device.ungrab();
        }
        for (name, device) in &mut devices {
            device.grab().map_err(|source| EventLoopError::Grab {
                device: name.clone(),
                source,
            })?;
            log::info!("Grabbed {}", name);
        }

        let poll_fds = devices
            .iter()
            .map(|(_, d)| libc::pollfd {
                fd: d.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect();
        let (names, devices) = devices.into_iter().unzip();

        Ok(Self {
            devices,
            names,
            poll_fds,
            grabbed: true,
        })
    }

    /// Keyboards that autodetection would grab, for `--list-devices`.
    pub fn list_devices(filter: &DeviceFilter) -> EventLoopResult<Vec<DeviceInfo>> {
        let mut infos = Vec::new();
        for (path, device) in evdev::enumerate() {
            let name = device.name().unwrap_or("Unknown");
            let path_str = path.to_str().unwrap_or_default();
            if filter.matches(name, path_str, &capabilities(&device)) {
                infos.push(DeviceInfo {
                    index: infos.len(),
                    name: name.to_string(),
                    path: path.to_str().map(String::from),
                });
            }
        }
        if infos.is_empty() {
            return Err(EventLoopError::DeviceNotFound("No keyboard devices found".to_string()));
        }
        Ok(infos)
    }

    fn find_devices(filter: &DeviceFilter) -> EventLoopResult<Vec<(String, Device)>> {
        let devices: Vec<(String, Device)> = evdev::enumerate()
            .filter(|(path, device)| {
                let name = device.name().unwrap_or("Unknown");
                filter.matches(name, path.to_str().unwrap_or_default(), &capabilities(device))
            })
            .map(|(_, device)| (device.name().unwrap_or("Unknown").to_string(), device))
            .collect();

        if devices.is_empty() {
            return Err(EventLoopError::DeviceNotFound("No keyboard devices found".to_string()));
        }
        Ok(devices)
    }

    /// Wait up to `timeout_ms` for key events.
    ///
    /// Returns an empty vector on timeout or when a signal interrupted the
    /// wait, so the caller can check its running flag.
    pub fn poll_for_events(&mut self, timeout_ms: i32) -> EventLoopResult<Vec<PolledEvent>> {
        let mut events = Vec::new();

        let poll_result = unsafe {
            libc::poll(
                self.poll_fds.as_mut_ptr(),
                self.poll_fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };

        if poll_result < 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                return Ok(events);
            }
            return Err(EventLoopError::Io(err));
        }
        if poll_result == 0 {
            return Ok(events);
        }

        for (i, device) in self.devices.iter_mut().enumerate() {
            if self.poll_fds[i].revents & libc::POLLIN == 0 {
                continue;
            }
            match device.fetch_events() {
                Ok(raw_events) => events.extend(
                    raw_events.filter_map(|raw| key_event(&raw).map(|key| PolledEvent { raw, key })),
                ),
                Err(e) => log::warn!("Failed to read from {}: {}", self.names[i], e),
            }
        }

        Ok(events)
    }

    /// Release every grab; safe to call more than once.
    pub fn ungrab_all(&mut self) {
        if self.grabbed {
            for device in &mut self.devices {
                let _ = device.ungrab();
            }
            self.grabbed = false;
            log::debug!("Released {} input devices", self.devices.len());
        }
    }

    pub fn device_names(&self) -> &[String] {
        &self.names
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

/// Devices must never stay grabbed once the loop is gone, or the keyboard
/// becomes unusable. Drop also runs during panic unwinding.
impl Drop for EventLoop {
    fn drop(&mut self) {
        self.ungrab_all();
    }
}
