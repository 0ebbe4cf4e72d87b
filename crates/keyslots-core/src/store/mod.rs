// Keyslots Store
// Slot ids, content escaping and the slot store file

pub mod document;
pub mod escape;
pub mod slot;
pub mod slot_store;

pub use document::{StoreDocument, DEFAULT_HEADER};
pub use slot::{SlotId, SlotRecord};
pub use slot_store::{ClearOutcome, InitOutcome, SlotStore, StoreError};
