//! CLI command implementations.

pub mod state;
