use crate::core::constants::{DEFAULT_PACK_PRICE, DEFAULT_SLOTS_PER_PACK, DEFAULT_TIER_LABEL};
use serde::{Deserialize, Serialize};

/// A rarity tier in simple mode: a label and its base probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleTier {
    pub label: String,
    pub probability: f64,
}

impl SimpleTier {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// A rarity tier in advanced mode.
///
/// `special_probability` is an independent distribution used only by the
/// special-slot pool. `fixed_count` slots are always assigned to this tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedTier {
    pub label: String,
    pub probability: f64,
    #[serde(default)]
    pub special_probability: f64,
    #[serde(default)]
    pub fixed_count: u32,
}

impl AdvancedTier {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
            special_probability: 0.0,
            fixed_count: 0,
        }
    }

    pub fn with_special(mut self, special_probability: f64) -> Self {
        self.special_probability = special_probability;
        self
    }

    pub fn with_fixed(mut self, fixed_count: u32) -> Self {
        self.fixed_count = fixed_count;
        self
    }
}

impl From<&SimpleTier> for AdvancedTier {
    fn from(tier: &SimpleTier) -> Self {
        AdvancedTier::new(tier.label.clone(), tier.probability)
    }
}

/// The rarity rules of a pack. A pack is in exactly one mode at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RarityMode {
    Simple {
        tiers: Vec<SimpleTier>,
    },
    Advanced {
        tiers: Vec<AdvancedTier>,
        #[serde(default)]
        special_slot_count: u32,
    },
}

impl RarityMode {
    pub fn is_advanced(&self) -> bool {
        matches!(self, RarityMode::Advanced { .. })
    }

    pub fn tier_count(&self) -> usize {
        match self {
            RarityMode::Simple { tiers } => tiers.len(),
            RarityMode::Advanced { tiers, .. } => tiers.len(),
        }
    }

    /// Tier labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            RarityMode::Simple { tiers } => tiers.iter().map(|t| t.label.as_str()).collect(),
            RarityMode::Advanced { tiers, .. } => tiers.iter().map(|t| t.label.as_str()).collect(),
        }
    }

    /// Base probability of every tier, in tier order.
    pub fn base_probabilities(&self) -> Vec<f64> {
        match self {
            RarityMode::Simple { tiers } => tiers.iter().map(|t| t.probability).collect(),
            RarityMode::Advanced { tiers, .. } => tiers.iter().map(|t| t.probability).collect(),
        }
    }

    /// Special-slot count; always 0 in simple mode.
    pub fn special_slot_count(&self) -> u32 {
        match self {
            RarityMode::Simple { .. } => 0,
            RarityMode::Advanced {
                special_slot_count, ..
            } => *special_slot_count,
        }
    }
}

/// Validated data model for a pack's rarity rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackRarityConfig {
    #[serde(flatten)]
    pub mode: RarityMode,
    pub slots_per_pack: u32,
    #[serde(default)]
    pub pack_price: f64,
    /// Tier list of the mode not currently in use, kept so that switching
    /// back restores it. Never read by validation, drawing or pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive: Option<RarityMode>,
}

impl PackRarityConfig {
    pub fn simple(tiers: Vec<SimpleTier>, slots_per_pack: u32, pack_price: f64) -> Self {
        Self {
            mode: RarityMode::Simple { tiers },
            slots_per_pack,
            pack_price,
            inactive: None,
        }
    }

    pub fn advanced(
        tiers: Vec<AdvancedTier>,
        special_slot_count: u32,
        slots_per_pack: u32,
        pack_price: f64,
    ) -> Self {
        Self {
            mode: RarityMode::Advanced {
                tiers,
                special_slot_count,
            },
            slots_per_pack,
            pack_price,
            inactive: None,
        }
    }

    /// Attach the other mode's tiers. Ignored if it is the same mode as the
    /// active one.
    pub fn with_inactive(mut self, inactive: RarityMode) -> Self {
        if inactive.is_advanced() != self.mode.is_advanced() {
            self.inactive = Some(inactive);
        }
        self
    }
}

impl Default for PackRarityConfig {
    /// A fresh pack: one Common tier at probability 1.
    fn default() -> Self {
        Self::simple(
            vec![SimpleTier::new(DEFAULT_TIER_LABEL, 1.0)],
            DEFAULT_SLOTS_PER_PACK,
            DEFAULT_PACK_PRICE,
        )
    }
}
