//! Packforge - Rarity Allocation and Pack-Opening Simulation Library
//!
//! Validates a pack's rarity configuration, simulates opening packs against
//! a card pool, and derives the implied value of a single card per rarity.

pub mod build_info;
pub mod catalog;
pub mod core;
pub mod draw;
pub mod error;
pub mod pricing;
pub mod rarity;
pub mod settings;
pub mod simulator;

pub use catalog::{Card, Catalog, Pack, ProductType};
pub use draw::{open_pack, CardPool, DrawFailure, InMemoryCardPool, OpeningResult, SlotBreakdown};
pub use error::{PackError, Result};
pub use pricing::{price_per_card, PriceTable};
pub use rarity::{
    validate_configuration, AdvancedTier, PackRarityConfig, RarityEditor, RarityMode, SimpleTier,
    ValidationReport,
};
