//! Editing session for a pack's rarity configuration.
//!
//! Both tier lists are kept so that toggling between simple and advanced mode
//! never loses the inactive mode's data.

use super::types::{AdvancedTier, PackRarityConfig, RarityMode, SimpleTier};
use super::validation::{
    ensure_savable, has_percent_mismatch, validate_configuration, ValidationReport,
};
use crate::error::{PackError, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Simple,
    Advanced,
}

#[derive(Debug, Clone)]
pub struct RarityEditor {
    mode: EditorMode,
    simple_tiers: Vec<SimpleTier>,
    advanced_tiers: Vec<AdvancedTier>,
    special_slot_count: u32,
    slots_per_pack: u32,
    pack_price: f64,
}

impl Default for RarityEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RarityEditor {
    pub fn new() -> Self {
        Self::from_config(&PackRarityConfig::default())
    }

    pub fn from_config(config: &PackRarityConfig) -> Self {
        let mut editor = Self {
            mode: EditorMode::Simple,
            simple_tiers: Vec::new(),
            advanced_tiers: Vec::new(),
            special_slot_count: 0,
            slots_per_pack: config.slots_per_pack,
            pack_price: config.pack_price,
        };
        if let Some(inactive) = &config.inactive {
            editor.load_mode(inactive);
        }
        editor.load_mode(&config.mode);
        editor.mode = if config.mode.is_advanced() {
            EditorMode::Advanced
        } else {
            EditorMode::Simple
        };
        editor
    }

    fn load_mode(&mut self, mode: &RarityMode) {
        match mode {
            RarityMode::Simple { tiers } => self.simple_tiers = tiers.clone(),
            RarityMode::Advanced {
                tiers,
                special_slot_count,
            } => {
                self.advanced_tiers = tiers.clone();
                self.special_slot_count = *special_slot_count;
            }
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn tier_count(&self) -> usize {
        match self.mode {
            EditorMode::Simple => self.simple_tiers.len(),
            EditorMode::Advanced => self.advanced_tiers.len(),
        }
    }

    /// Switch between simple and advanced mode.
    ///
    /// The first switch to advanced seeds the advanced tiers from the simple
    /// ones; the first switch back to simple does the reverse.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            EditorMode::Simple => {
                if self.advanced_tiers.is_empty() {
                    self.advanced_tiers = self.simple_tiers.iter().map(AdvancedTier::from).collect();
                }
                EditorMode::Advanced
            }
            EditorMode::Advanced => {
                if self.simple_tiers.is_empty() {
                    self.simple_tiers = self
                        .advanced_tiers
                        .iter()
                        .map(|t| SimpleTier::new(t.label.clone(), t.probability))
                        .collect();
                }
                EditorMode::Simple
            }
        };
        debug!(mode = ?self.mode, "Toggled rarity mode");
    }

    /// Append a tier with zero probability.
    pub fn add_tier(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self.mode {
            EditorMode::Simple => self.simple_tiers.push(SimpleTier::new(label, 0.0)),
            EditorMode::Advanced => self.advanced_tiers.push(AdvancedTier::new(label, 0.0)),
        }
    }

    pub fn remove_tier(&mut self, index: usize) -> Result<()> {
        let len = self.tier_count();
        if index >= len {
            return Err(PackError::TierNotFound { index });
        }
        if len == 1 {
            return Err(PackError::LastTier);
        }
        match self.mode {
            EditorMode::Simple => {
                self.simple_tiers.remove(index);
            }
            EditorMode::Advanced => {
                self.advanced_tiers.remove(index);
            }
        }
        Ok(())
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        match self.mode {
            EditorMode::Simple => self.simple_tier_mut(index)?.label = label,
            EditorMode::Advanced => self.advanced_tier_mut(index)?.label = label,
        }
        Ok(())
    }

    pub fn set_probability(&mut self, index: usize, probability: f64) -> Result<()> {
        match self.mode {
            EditorMode::Simple => self.simple_tier_mut(index)?.probability = probability,
            EditorMode::Advanced => self.advanced_tier_mut(index)?.probability = probability,
        }
        Ok(())
    }

    /// Set a base probability from percentage input (0-100).
    pub fn set_probability_percent(&mut self, index: usize, percent: f64) -> Result<()> {
        self.set_probability(index, percent / 100.0)
    }

    pub fn set_special_probability(&mut self, index: usize, probability: f64) -> Result<()> {
        self.require_advanced("special probability")?;
        self.advanced_tier_mut(index)?.special_probability = probability;
        Ok(())
    }

    pub fn set_fixed_count(&mut self, index: usize, fixed_count: u32) -> Result<()> {
        self.require_advanced("fixed count")?;
        self.advanced_tier_mut(index)?.fixed_count = fixed_count;
        Ok(())
    }

    pub fn set_special_slot_count(&mut self, count: u32) -> Result<()> {
        self.require_advanced("special slot count")?;
        self.special_slot_count = count;
        Ok(())
    }

    pub fn set_slots_per_pack(&mut self, slots: u32) {
        self.slots_per_pack = slots;
    }

    pub fn set_pack_price(&mut self, price: f64) {
        self.pack_price = price;
    }

    /// Snapshot of the active mode as a configuration, carrying the other
    /// mode's tiers when there are any.
    pub fn config(&self) -> PackRarityConfig {
        let simple = RarityMode::Simple {
            tiers: self.simple_tiers.clone(),
        };
        let advanced = RarityMode::Advanced {
            tiers: self.advanced_tiers.clone(),
            special_slot_count: self.special_slot_count,
        };
        let (active, inactive) = match self.mode {
            EditorMode::Simple => (simple, advanced),
            EditorMode::Advanced => (advanced, simple),
        };

        let config = PackRarityConfig {
            mode: active,
            slots_per_pack: self.slots_per_pack,
            pack_price: self.pack_price,
            inactive: None,
        };
        if inactive.tier_count() > 0 {
            config.with_inactive(inactive)
        } else {
            config
        }
    }

    /// Sum of the active mode's base probabilities on the 0-100 scale used
    /// by percentage input.
    pub fn base_total_percent(&self) -> f64 {
        self.validate().base_total * 100.0
    }

    /// Percentage-scale counterpart of `ValidationReport::base_mismatch`, for
    /// tiers entered through `set_probability_percent`.
    pub fn percent_mismatch(&self) -> bool {
        has_percent_mismatch(self.base_total_percent())
    }

    pub fn validate(&self) -> ValidationReport {
        validate_configuration(&self.config())
    }

    /// Produce the configuration to persist, or the reason it cannot be saved.
    pub fn save(&self) -> Result<PackRarityConfig> {
        let config = self.config();
        ensure_savable(&config)?;
        Ok(config)
    }

    fn require_advanced(&self, field: &'static str) -> Result<()> {
        match self.mode {
            EditorMode::Advanced => Ok(()),
            EditorMode::Simple => Err(PackError::AdvancedOnly { field }),
        }
    }

    fn simple_tier_mut(&mut self, index: usize) -> Result<&mut SimpleTier> {
        self.simple_tiers
            .get_mut(index)
            .ok_or(PackError::TierNotFound { index })
    }

    fn advanced_tier_mut(&mut self, index: usize) -> Result<&mut AdvancedTier> {
        self.advanced_tiers
            .get_mut(index)
            .ok_or(PackError::TierNotFound { index })
    }
}
