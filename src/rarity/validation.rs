//! Rarity configuration validation.
//!
//! The sums and mismatch checks here are pure functions. The editor calls them
//! on every change to drive warnings; `ensure_savable` is the authoritative
//! gate applied once more at save time.

use super::types::{AdvancedTier, PackRarityConfig, RarityMode, SimpleTier};
use crate::core::constants::{PERCENT_EPSILON, PROBABILITY_EPSILON};
use crate::error::{PackError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Non-finite values contribute nothing to a sum.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Sum of base probabilities across simple tiers.
pub fn total_probability(tiers: &[SimpleTier]) -> f64 {
    tiers.iter().map(|t| finite_or_zero(t.probability)).sum()
}

/// Sum of base probabilities across advanced tiers.
pub fn total_advanced_probability(tiers: &[AdvancedTier]) -> f64 {
    tiers.iter().map(|t| finite_or_zero(t.probability)).sum()
}

pub fn total_special_probability(tiers: &[AdvancedTier]) -> f64 {
    tiers
        .iter()
        .map(|t| finite_or_zero(t.special_probability))
        .sum()
}

/// Summed in `u64` so that large per-tier counts cannot wrap past the
/// capacity check.
pub fn total_fixed_count(tiers: &[AdvancedTier]) -> u64 {
    tiers.iter().map(|t| u64::from(t.fixed_count)).sum()
}

/// True when `total` differs from `expected` by more than the shared tolerance.
pub fn has_mismatch(total: f64, expected: f64) -> bool {
    !((total - expected).abs() <= PROBABILITY_EPSILON)
}

/// Percentage-scaled form of `has_mismatch` for editor input (0-100).
pub(crate) fn has_percent_mismatch(total_percent: f64) -> bool {
    !((total_percent - 100.0).abs() <= PERCENT_EPSILON)
}

/// Remaining basic slots after fixed and special allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BasicSlots {
    /// Clamped to 0 for display when the budget overflows.
    pub basic_slots: u32,
    pub is_negative: bool,
}

pub fn compute_basic_slots(fixed_total: u64, special_slot_count: u32, slots_per_pack: u32) -> BasicSlots {
    let raw = i128::from(slots_per_pack) - i128::from(fixed_total) - i128::from(special_slot_count);
    BasicSlots {
        basic_slots: raw.max(0) as u32,
        is_negative: raw < 0,
    }
}

/// Live validation state of a configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub base_mismatch: bool,
    pub special_mismatch: bool,
    pub slots_negative: bool,
    pub base_total: f64,
    pub special_total: f64,
    pub fixed_total: u64,
    pub basic_slots: u32,
}

impl ValidationReport {
    pub fn is_savable(&self) -> bool {
        !self.base_mismatch && !self.special_mismatch && !self.slots_negative
    }

    /// Difference between the base total and 1.
    pub fn base_delta(&self) -> f64 {
        self.base_total - 1.0
    }

    pub fn special_delta(&self) -> f64 {
        self.special_total - 1.0
    }

    /// Human-readable warnings, one per failed check.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if self.base_mismatch {
            messages.push(format!(
                "Base probabilities sum to {:.4}% ({:+.4}% from 100%)",
                self.base_total * 100.0,
                self.base_delta() * 100.0
            ));
        }
        if self.special_mismatch {
            messages.push(format!(
                "Special probabilities sum to {:.4}% ({:+.4}% from 100%)",
                self.special_total * 100.0,
                self.special_delta() * 100.0
            ));
        }
        if self.slots_negative {
            messages.push(format!(
                "Fixed and special slots exceed the pack size ({} fixed allocated)",
                self.fixed_total
            ));
        }
        messages
    }
}

pub fn validate_configuration(config: &PackRarityConfig) -> ValidationReport {
    match &config.mode {
        RarityMode::Simple { tiers } => {
            let base_total = total_probability(tiers);
            ValidationReport {
                base_mismatch: has_mismatch(base_total, 1.0),
                special_mismatch: false,
                slots_negative: false,
                base_total,
                special_total: 0.0,
                fixed_total: 0,
                basic_slots: config.slots_per_pack,
            }
        }
        RarityMode::Advanced {
            tiers,
            special_slot_count,
        } => {
            let base_total = total_advanced_probability(tiers);
            let special_total = total_special_probability(tiers);
            let fixed_total = total_fixed_count(tiers);
            let basic = compute_basic_slots(fixed_total, *special_slot_count, config.slots_per_pack);
            ValidationReport {
                base_mismatch: has_mismatch(base_total, 1.0),
                special_mismatch: *special_slot_count > 0 && has_mismatch(special_total, 1.0),
                slots_negative: basic.is_negative,
                base_total,
                special_total,
                fixed_total,
                basic_slots: basic.basic_slots,
            }
        }
    }
}

fn check_probability(label: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PackError::InvalidProbability {
            label: label.to_string(),
            value,
        })
    }
}

fn check_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            return Err(PackError::DuplicateLabel {
                label: label.to_string(),
            });
        }
    }
    Ok(())
}

/// Structural checks: a configuration failing these must never be simulated.
pub fn check_structure(config: &PackRarityConfig) -> Result<()> {
    if config.mode.tier_count() == 0 {
        return Err(PackError::EmptyTiers);
    }
    if config.slots_per_pack == 0 {
        return Err(PackError::ZeroSlots);
    }
    check_labels(config.mode.labels().into_iter())?;

    match &config.mode {
        RarityMode::Simple { tiers } => {
            for tier in tiers {
                check_probability(&tier.label, tier.probability)?;
            }
        }
        RarityMode::Advanced {
            tiers,
            special_slot_count,
        } => {
            for tier in tiers {
                check_probability(&tier.label, tier.probability)?;
                check_probability(&tier.label, tier.special_probability)?;
            }
            let fixed = total_fixed_count(tiers);
            if compute_basic_slots(fixed, *special_slot_count, config.slots_per_pack).is_negative {
                return Err(PackError::SlotOverflow {
                    fixed,
                    special: *special_slot_count,
                    slots_per_pack: config.slots_per_pack,
                });
            }
        }
    }
    Ok(())
}

/// Save gate: structure must hold and every probability sum must match.
pub fn ensure_savable(config: &PackRarityConfig) -> Result<()> {
    check_structure(config)?;

    let report = validate_configuration(config);
    if report.base_mismatch {
        return Err(PackError::ProbabilityMismatch {
            total: report.base_total,
        });
    }
    if report.special_mismatch {
        return Err(PackError::SpecialProbabilityMismatch {
            total: report.special_total,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(tiers: &[(&str, f64)], slots: u32) -> PackRarityConfig {
        PackRarityConfig::simple(
            tiers.iter().map(|(l, p)| SimpleTier::new(*l, *p)).collect(),
            slots,
            0.0,
        )
    }

    #[test]
    fn test_has_mismatch_within_tolerance() {
        assert!(!has_mismatch(1.0, 1.0));
        assert!(!has_mismatch(1.0 + 5e-7, 1.0));
        assert!(!has_mismatch(0.1 + 0.2 + 0.7, 1.0));
        assert!(has_mismatch(1.0 + 2e-6, 1.0));
        assert!(has_mismatch(0.99, 1.0));
    }

    #[test]
    fn test_percent_mismatch_agrees_with_fraction() {
        assert!(!has_percent_mismatch(100.0));
        assert!(!has_percent_mismatch(100.0 + 5e-5));
        assert!(has_percent_mismatch(100.0 + 2e-4));
        assert_eq!(has_percent_mismatch(99.0), has_mismatch(0.99, 1.0));
    }

    #[test]
    fn test_has_mismatch_nan_is_mismatch() {
        assert!(has_mismatch(f64::NAN, 1.0));
    }

    #[test]
    fn test_total_probability_ignores_non_finite() {
        let tiers = vec![
            SimpleTier::new("Common", 0.7),
            SimpleTier::new("Broken", f64::NAN),
            SimpleTier::new("Rare", 0.3),
        ];
        assert!((total_probability(&tiers) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_count_sum_does_not_wrap() {
        let config = PackRarityConfig::advanced(
            vec![
                AdvancedTier::new("Common", 1.0).with_fixed(u32::MAX),
                AdvancedTier::new("Foil", 0.0).with_fixed(2),
            ],
            0,
            5,
            0.0,
        );
        let report = validate_configuration(&config);
        assert_eq!(report.fixed_total, u64::from(u32::MAX) + 2);
        assert!(report.slots_negative);
        assert!(matches!(
            check_structure(&config),
            Err(PackError::SlotOverflow { fixed, .. }) if fixed == u64::from(u32::MAX) + 2
        ));
    }

    #[test]
    fn test_compute_basic_slots() {
        assert_eq!(
            compute_basic_slots(2, 1, 10),
            BasicSlots {
                basic_slots: 7,
                is_negative: false
            }
        );
        assert_eq!(
            compute_basic_slots(5, 0, 5),
            BasicSlots {
                basic_slots: 0,
                is_negative: false
            }
        );
        assert_eq!(
            compute_basic_slots(4, 3, 5),
            BasicSlots {
                basic_slots: 0,
                is_negative: true
            }
        );
    }

    #[test]
    fn test_validate_simple_config() {
        let report = validate_configuration(&simple(&[("Common", 0.8), ("Rare", 0.2)], 5));
        assert!(report.is_savable());
        assert!(report.messages().is_empty());
        assert_eq!(report.basic_slots, 5);
    }

    #[test]
    fn test_validate_reports_base_delta() {
        let report = validate_configuration(&simple(&[("Common", 0.8), ("Rare", 0.1)], 5));
        assert!(report.base_mismatch);
        assert!((report.base_delta() + 0.1).abs() < 1e-9);
        let messages = report.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("-10.0000%"), "{}", messages[0]);
    }

    #[test]
    fn test_special_mismatch_only_with_special_slots() {
        let tiers = vec![AdvancedTier::new("Common", 1.0)];
        let without = PackRarityConfig::advanced(tiers.clone(), 0, 5, 0.0);
        assert!(!validate_configuration(&without).special_mismatch);

        let with = PackRarityConfig::advanced(tiers, 1, 5, 0.0);
        let report = validate_configuration(&with);
        assert!(report.special_mismatch);
        assert!(!report.is_savable());
    }

    #[test]
    fn test_slots_negative_blocks_save() {
        let tiers = vec![AdvancedTier::new("Common", 1.0)
            .with_special(1.0)
            .with_fixed(4)];
        let config = PackRarityConfig::advanced(tiers, 2, 5, 0.0);
        let report = validate_configuration(&config);
        assert!(report.slots_negative);
        assert_eq!(report.basic_slots, 0);
        assert!(matches!(
            ensure_savable(&config),
            Err(PackError::SlotOverflow {
                fixed: 4,
                special: 2,
                slots_per_pack: 5
            })
        ));
    }

    #[test]
    fn test_check_structure_rejects_malformed() {
        assert!(matches!(
            check_structure(&simple(&[], 5)),
            Err(PackError::EmptyTiers)
        ));
        assert!(matches!(
            check_structure(&simple(&[("Common", 1.0)], 0)),
            Err(PackError::ZeroSlots)
        ));
        assert!(matches!(
            check_structure(&simple(&[("Common", 0.5), ("Common", 0.5)], 5)),
            Err(PackError::DuplicateLabel { .. })
        ));
        assert!(matches!(
            check_structure(&simple(&[("Common", 1.5)], 5)),
            Err(PackError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_check_structure_allows_mismatch() {
        // A mismatched sum is a warning, not a structural failure
        let config = simple(&[("Common", 0.5)], 5);
        assert!(check_structure(&config).is_ok());
        assert!(matches!(
            ensure_savable(&config),
            Err(PackError::ProbabilityMismatch { .. })
        ));
    }
}
