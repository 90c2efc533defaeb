//! Per-card value derived from a pack's sale price.
//!
//! Booster model: every tier accounts for an equal share of the pack price,
//! so `expected_count(tier) * value(tier) = price / n` with `n` the number of
//! tiers. A tier that can never be drawn is valued 0 but still counts in `n`. With
//! `expected_count = slots * p` this gives `value = K / p` where
//! `K = price / (n * slots)`. Advanced packs use the blended probability
//! across fixed, special and basic pools in place of `p`.

use super::types::{PriceTable, TierPrice};
use crate::catalog::types::{Pack, ProductType};
use crate::draw::allocator::allocate;
use crate::rarity::types::{PackRarityConfig, RarityMode};
use crate::rarity::validation::{finite_or_zero, total_fixed_count};

/// Expected number of cards of each tier in one opening, in tier order.
pub fn expected_counts(config: &PackRarityConfig) -> Vec<(String, f64)> {
    let breakdown = allocate(config);
    match &config.mode {
        RarityMode::Simple { tiers } => tiers
            .iter()
            .map(|t| {
                (
                    t.label.clone(),
                    config.slots_per_pack as f64 * finite_or_zero(t.probability),
                )
            })
            .collect(),
        RarityMode::Advanced { tiers, .. } => {
            let fixed_total = total_fixed_count(tiers);
            tiers
                .iter()
                .map(|t| {
                    let fixed = if fixed_total > 0 {
                        breakdown.fixed_slots as f64 * (t.fixed_count as f64 / fixed_total as f64)
                    } else {
                        0.0
                    };
                    let special = breakdown.special_slots as f64 * finite_or_zero(t.special_probability);
                    let basic = breakdown.basic_slots as f64 * finite_or_zero(t.probability);
                    (t.label.clone(), fixed + special + basic)
                })
                .collect()
        }
    }
}

/// Equal-contribution pricing policy: value of one card of a tier with the
/// given blended probability, for `k = price / (n * slots)`.
pub fn equal_contribution_value(k: f64, blended_probability: f64) -> f64 {
    if blended_probability > 0.0 {
        k / blended_probability
    } else {
        0.0
    }
}

/// Constructed-deck pricing: `price / total_card_count` for every tier.
pub fn uniform_price_table(config: &PackRarityConfig, total_card_count: usize) -> PriceTable {
    let price = finite_or_zero(config.pack_price);
    let value = if total_card_count > 0 {
        price / total_card_count as f64
    } else {
        0.0
    };
    let entries = config
        .mode
        .labels()
        .into_iter()
        .map(|label| TierPrice {
            label: label.to_string(),
            expected_count: 0.0,
            blended_probability: 0.0,
            value_per_card: value,
        })
        .collect();
    PriceTable {
        pack_price: price,
        entries,
    }
}

/// Per-card value of every rarity tier in the pack.
///
/// Constructed decks use their declared `card_count`; `Catalog::price_table`
/// prices them from the cards actually registered instead.
///
/// Display-only; never used by the simulator.
pub fn price_per_card(pack: &Pack) -> PriceTable {
    let config = &pack.rarity;
    let price = finite_or_zero(config.pack_price);

    if let ProductType::ConstructedDeck { card_count } = pack.product_type {
        return uniform_price_table(config, card_count as usize);
    }

    let slots = config.slots_per_pack;
    let counts = expected_counts(config);
    // Every tier counts toward n, including ones that can never be drawn
    let n = counts.len();

    let k = if n > 0 && slots > 0 {
        price / (n as f64 * slots as f64)
    } else {
        0.0
    };

    let entries = counts
        .into_iter()
        .map(|(label, expected_count)| {
            let blended_probability = if slots > 0 {
                expected_count / slots as f64
            } else {
                0.0
            };
            TierPrice {
                label,
                expected_count,
                blended_probability,
                value_per_card: equal_contribution_value(k, blended_probability),
            }
        })
        .collect();

    PriceTable {
        pack_price: price,
        entries,
    }
}
