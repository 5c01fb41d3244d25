//! Configuration types
//!
//! Board-agnostic configuration structures. The tracker binary parses them
//! from TOML; the core only sees the parsed values.

pub mod types;

pub use types::*;
