// Keyslots Input Layer
// Device detection and filtering logic

mod device;
mod filter;

pub use device::{is_virtual_device, DeviceCapabilities, VIRTUAL_DEVICE_NAME};
pub use filter::DeviceFilter;
