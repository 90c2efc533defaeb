//! Shared constants.

pub mod constants;

pub use constants::*;
