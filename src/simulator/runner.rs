//! Opens many packs with independent RNG streams and aggregates the results.

use super::config::SimConfig;
use super::report::SimReport;
use crate::catalog::types::Pack;
use crate::draw::opening::open_pack;
use crate::draw::pool::CardPool;
use crate::error::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Run the full simulation and return a report.
pub fn run_simulation(pack: &Pack, pool: &impl CardPool, config: &SimConfig) -> Result<SimReport> {
    let mut report = SimReport::new(pack);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let opening = open_pack(pack, pool, &mut rng)?;

        if config.verbosity >= 2 {
            debug!(
                run = run_idx + 1,
                total = config.num_runs,
                drawn = opening.total_drawn(),
                failed = opening.total_failed(),
                "Simulated opening"
            );
        }

        report.record(&opening);
    }

    if config.verbosity >= 1 {
        info!(
            pack = %pack.id,
            runs = report.num_runs,
            drawn = report.total_drawn,
            failed = report.total_failed,
            "Simulation finished"
        );
    }

    Ok(report)
}
