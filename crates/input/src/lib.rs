//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Every key press
//! is one discrete request; there is no auto-repeat handling, so terminals without
//! key-release events behave the same as those with them.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
