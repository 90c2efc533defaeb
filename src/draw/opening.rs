//! Pack opening: fixed slots first, then special, then basic.
//!
//! A slot whose rarity has no registered cards is skipped and recorded as a
//! failure. It is never re-rolled into a different rarity, so the configured
//! distribution is not distorted.

use super::allocator::{allocate, SlotBreakdown};
use super::pool::CardPool;
use super::sampler::{sample, WeightedLabel};
use crate::catalog::types::Pack;
use crate::error::Result;
use crate::rarity::types::RarityMode;
use crate::rarity::validation::check_structure;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Slots of one rarity that could not be filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawFailure {
    pub rarity: String,
    pub count: u32,
}

/// Outcome of one simulated pack opening.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpeningResult {
    pub pack_id: String,
    pub breakdown: SlotBreakdown,
    /// Card id to number of copies drawn.
    pub results: BTreeMap<String, u32>,
    /// Unfilled slots grouped by rarity, in order of first failure.
    pub failures: Vec<DrawFailure>,
    /// Rarity label to number of cards drawn.
    pub rarity_counts: BTreeMap<String, u32>,
}

impl OpeningResult {
    fn new(pack_id: &str, breakdown: SlotBreakdown) -> Self {
        Self {
            pack_id: pack_id.to_string(),
            breakdown,
            ..Default::default()
        }
    }

    pub fn total_drawn(&self) -> u32 {
        self.results.values().sum()
    }

    pub fn total_failed(&self) -> u32 {
        self.failures.iter().map(|f| f.count).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn drawn_of(&self, rarity: &str) -> u32 {
        self.rarity_counts.get(rarity).copied().unwrap_or(0)
    }

    /// Warning for the user listing each under-filled rarity, if any.
    pub fn warning(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .failures
            .iter()
            .map(|f| {
                let noun = if f.count == 1 { "slot" } else { "slots" };
                format!("{} {} {}", f.count, f.rarity, noun)
            })
            .collect();
        Some(format!(
            "No cards registered for some rarities; skipped {}",
            parts.join(", ")
        ))
    }

    fn record_card(&mut self, rarity: &str, card_id: String) {
        *self.results.entry(card_id).or_insert(0) += 1;
        *self.rarity_counts.entry(rarity.to_string()).or_insert(0) += 1;
    }

    fn record_failure(&mut self, rarity: &str) {
        match self.failures.iter_mut().find(|f| f.rarity == rarity) {
            Some(failure) => failure.count += 1,
            None => self.failures.push(DrawFailure {
                rarity: rarity.to_string(),
                count: 1,
            }),
        }
    }
}

/// Draws single cards of a known rarity into an `OpeningResult`.
struct Drawer<'a, P: CardPool> {
    pack_id: &'a str,
    pool: &'a P,
    result: OpeningResult,
}

impl<'a, P: CardPool> Drawer<'a, P> {
    fn draw(&mut self, rarity: &str, rng: &mut impl Rng) {
        let candidates = self.pool.cards_for(self.pack_id, rarity);
        if candidates.is_empty() {
            self.result.record_failure(rarity);
            return;
        }
        let idx = rng.gen_range(0..candidates.len());
        let card_id = candidates[idx].clone();
        self.result.record_card(rarity, card_id);
    }

    fn draw_sampled(&mut self, weights: &[WeightedLabel<'_>], count: u32, rng: &mut impl Rng) {
        for _ in 0..count {
            let rarity = sample(weights, rng);
            self.draw(rarity, rng);
        }
    }
}

/// Simulate opening one pack.
///
/// Fails only when the configuration is structurally malformed (no tiers,
/// zero slots, duplicate labels, out-of-range probabilities, or more fixed
/// and special slots than the pack holds). Unfilled slots are reported in
/// `failures` instead.
pub fn open_pack(pack: &Pack, pool: &impl CardPool, rng: &mut impl Rng) -> Result<OpeningResult> {
    let config = &pack.rarity;
    check_structure(config)?;

    let breakdown = allocate(config);
    let mut drawer = Drawer {
        pack_id: &pack.id,
        pool,
        result: OpeningResult::new(&pack.id, breakdown),
    };

    match &config.mode {
        RarityMode::Simple { tiers } => {
            let base: Vec<_> = tiers
                .iter()
                .map(|t| WeightedLabel::new(&t.label, t.probability))
                .collect();
            debug!(slots = breakdown.basic_slots, "Drawing basic slots");
            drawer.draw_sampled(&base, breakdown.basic_slots, rng);
        }
        RarityMode::Advanced { tiers, .. } => {
            debug!(slots = breakdown.fixed_slots, "Drawing fixed slots");
            for tier in tiers {
                for _ in 0..tier.fixed_count {
                    drawer.draw(&tier.label, rng);
                }
            }

            let special: Vec<_> = tiers
                .iter()
                .map(|t| WeightedLabel::new(&t.label, t.special_probability))
                .collect();
            debug!(slots = breakdown.special_slots, "Drawing special slots");
            drawer.draw_sampled(&special, breakdown.special_slots, rng);

            let base: Vec<_> = tiers
                .iter()
                .map(|t| WeightedLabel::new(&t.label, t.probability))
                .collect();
            debug!(slots = breakdown.basic_slots, "Drawing basic slots");
            drawer.draw_sampled(&base, breakdown.basic_slots, rng);
        }
    }

    let result = drawer.result;
    for failure in &result.failures {
        warn!(
            pack = %pack.id,
            rarity = %failure.rarity,
            count = failure.count,
            "No cards available for rarity"
        );
    }
    debug!(
        pack = %pack.id,
        drawn = result.total_drawn(),
        failed = result.total_failed(),
        "Opened pack"
    );
    Ok(result)
}
