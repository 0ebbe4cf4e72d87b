// Keyslots Input Layer - Device Detection
// Decides which evdev devices look like physical keyboards

/// Name of the virtual keyboard keyslots creates; never grabbed back.
pub const VIRTUAL_DEVICE_NAME: &str = "Keyslots (virtual) keyboard";

// Q W E R T Y
const QWERTY_CODES: [u16; 6] = [16, 17, 18, 19, 20, 21];
// SPACE A Z
const A_Z_SPACE_CODES: [u16; 3] = [57, 30, 44];

/// Key capabilities of an input device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub has_ev_key: bool,
    pub supported_keys: Vec<u16>,
}

impl DeviceCapabilities {
    pub fn new(has_ev_key: bool, supported_keys: Vec<u16>) -> Self {
        Self {
            has_ev_key,
            supported_keys,
        }
    }

    pub fn supports_key(&self, code: u16) -> bool {
        self.supported_keys.contains(&code)
    }

    /// A keyboard reports the QWERTY row plus A, Z and SPACE.
    pub fn is_keyboard(&self) -> bool {
        self.has_ev_key
            && QWERTY_CODES
                .iter()
                .chain(A_Z_SPACE_CODES.iter())
                .all(|code| self.supports_key(*code))
    }
}

/// True for the device keyslots itself emits on.
pub fn is_virtual_device(name: &str) -> bool {
    name.contains(VIRTUAL_DEVICE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard_caps() -> DeviceCapabilities {
        let mut keys = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        keys.extend_from_slice(&QWERTY_CODES);
        keys.extend_from_slice(&A_Z_SPACE_CODES);
        DeviceCapabilities::new(true, keys)
    }

    #[test]
    fn test_full_keyboard_detected() {
        assert!(keyboard_caps().is_keyboard());
    }

    #[test]
    fn test_mouse_is_not_keyboard() {
        // BTN_LEFT, BTN_RIGHT, BTN_MIDDLE
        assert!(!DeviceCapabilities::new(true, vec![272, 273, 274]).is_keyboard());
    }

    #[test]
    fn test_missing_space_is_not_keyboard() {
        let mut caps = keyboard_caps();
        caps.supported_keys.retain(|code| *code != 57);
        assert!(!caps.is_keyboard());
    }

    #[test]
    fn test_no_ev_key() {
        let mut caps = keyboard_caps();
        caps.has_ev_key = false;
        assert!(!caps.is_keyboard());
    }

    #[test]
    fn test_virtual_device_name() {
        assert!(is_virtual_device(VIRTUAL_DEVICE_NAME));
        assert!(!is_virtual_device("AT Translated Set 2 keyboard"));
    }
}
