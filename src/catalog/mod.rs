//! Packs and cards as seen by the engine, plus a JSON file store.

pub mod store;
pub mod types;

pub use store::*;
pub use types::*;
