// Keyslots Output Layer
// Virtual keyboard the foreground application receives keys from

mod uinput;

pub use uinput::{UInputError, VirtualDevice};
