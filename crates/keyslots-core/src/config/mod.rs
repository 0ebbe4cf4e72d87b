// Keyslots Config
// Key bindings, slot labels and their resolution to physical keys

pub mod bindings;
pub mod parser;

pub use bindings::{Bindings, Role};
pub use parser::{parse_key_spec, ConfigParseError, Configuration, SlotLabels, PRIMARY_SLOT_COUNT};
