// Keyslots Transform Module
// Combo resolution from raw key events to actions

pub mod action;
pub mod resolver;

pub use action::Action;
pub use resolver::{transition, ComboResolver, Disposition, Resolution, ResolverState};
