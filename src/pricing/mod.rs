//! Per-card pricing derived from pack price and rarity configuration.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
