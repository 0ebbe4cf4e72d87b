// Keyslots Input Layer - Device Filtering
// Autodetection or an explicit list of device paths and names

use super::device::{is_virtual_device, DeviceCapabilities};

/// Which devices get grabbed.
///
/// With an explicit list only devices whose path or name is listed match,
/// keyboard or not. Otherwise every physical keyboard matches except our
/// own virtual device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    only: Vec<String>,
}

impl DeviceFilter {
    pub fn autodetect() -> Self {
        Self::default()
    }

    pub fn only(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            only: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_autodetect(&self) -> bool {
        self.only.is_empty()
    }

    pub fn matches(&self, name: &str, path: &str, caps: &DeviceCapabilities) -> bool {
        if !self.only.is_empty() {
            return self.only.iter().any(|m| m == path || m == name);
        }
        !is_virtual_device(name) && caps.is_keyboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::device::VIRTUAL_DEVICE_NAME;

    fn keyboard() -> DeviceCapabilities {
        DeviceCapabilities::new(true, vec![16, 17, 18, 19, 20, 21, 57, 30, 44])
    }

    #[test]
    fn test_matches_by_path_or_name() {
        let filter = DeviceFilter::only(["/dev/input/event0", "Logitech Keyboard"]);
        assert!(filter.matches("Other", "/dev/input/event0", &keyboard()));
        assert!(filter.matches("Logitech Keyboard", "/dev/input/event5", &keyboard()));
        assert!(!filter.matches("Other", "/dev/input/event1", &keyboard()));
    }

    #[test]
    fn test_explicit_match_ignores_capabilities() {
        let filter = DeviceFilter::only(["Macro Pad"]);
        assert!(filter.matches("Macro Pad", "/dev/input/event9", &DeviceCapabilities::default()));
    }

    #[test]
    fn test_autodetect() {
        let filter = DeviceFilter::autodetect();
        assert!(filter.is_autodetect());
        assert!(filter.matches("Generic Keyboard", "/dev/input/event0", &keyboard()));
        assert!(!filter.matches("Generic Mouse", "/dev/input/event1", &DeviceCapabilities::new(true, vec![272])));
        assert!(!filter.matches(VIRTUAL_DEVICE_NAME, "/dev/input/event2", &keyboard()));
    }
}
