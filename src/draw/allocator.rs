use crate::rarity::types::{PackRarityConfig, RarityMode};
use crate::rarity::validation::{compute_basic_slots, total_fixed_count};
use serde::Serialize;

/// How a pack's slots split across the three pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SlotBreakdown {
    pub fixed_slots: u64,
    pub special_slots: u32,
    pub basic_slots: u32,
}

impl SlotBreakdown {
    pub fn total(&self) -> u64 {
        self.fixed_slots + u64::from(self.special_slots) + u64::from(self.basic_slots)
    }
}

/// Partition the pack's slots into fixed, special and basic pools.
///
/// `basic_slots` is clamped at 0 when fixed + special overflow the pack;
/// callers that draw must reject that case first.
pub fn allocate(config: &PackRarityConfig) -> SlotBreakdown {
    match &config.mode {
        RarityMode::Simple { .. } => SlotBreakdown {
            fixed_slots: 0,
            special_slots: 0,
            basic_slots: config.slots_per_pack,
        },
        RarityMode::Advanced {
            tiers,
            special_slot_count,
        } => {
            let fixed_slots = total_fixed_count(tiers);
            SlotBreakdown {
                fixed_slots,
                special_slots: *special_slot_count,
                basic_slots: compute_basic_slots(fixed_slots, *special_slot_count, config.slots_per_pack)
                    .basic_slots,
            }
        }
    }
}
