//! Monte Carlo pack-opening simulator.
//!
//! Opens the same pack many times to compare the observed rarity
//! distribution against the configured one and to spot rarities whose card
//! pool is empty.
//!
//! Every opening goes through `open_pack` (src/draw/opening.rs), so results
//! match what a single opening would produce.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::run_simulation;
