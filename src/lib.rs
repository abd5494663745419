//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one roof as
//! `blockfall::{core, input, term, types}`, plus the binary's [`config`].

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
