//! Simulation configuration.

use crate::core::constants::DEFAULT_SIM_RUNS;

/// Configuration for a batch of simulated pack openings.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of packs to open
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = every opening)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_SIM_RUNS,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick reproducible config for spot checks
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 100,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Large batch for distribution analysis
    pub fn distribution_analysis(num_runs: u32) -> Self {
        Self {
            num_runs,
            verbosity: 0,
            ..Default::default()
        }
    }
}
