//! Rarity configuration: data model, validation, and the editing session.

pub mod editor;
pub mod types;
pub mod validation;

pub use editor::*;
pub use types::*;
pub use validation::*;
