// Keyslots State
// Per-role key state, slot digit accumulation and held-key bookkeeping

pub mod accumulator;
pub mod pressed;
pub mod tracker;

pub use accumulator::{AccumulationMode, SlotAccumulator};
pub use pressed::HeldKeys;
pub use tracker::{KeyTracker, TrackedKey};
