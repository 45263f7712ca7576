//! Per-slot enhancement paid for with strengthening stones.
//!
//! Enhancement belongs to the slot rather than the item, so swapping gear
//! keeps the bonus.

use super::types::EquipmentSlot;
use crate::core::constants::{ENHANCEMENT_COST_PER_LEVEL, ENHANCEMENT_PERCENT_PER_LEVEL};
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotEnhancements {
    levels: BTreeMap<EquipmentSlot, u32>,
}

impl SlotEnhancements {
    pub fn level(&self, slot: EquipmentSlot) -> u32 {
        self.levels.get(&slot).copied().unwrap_or(0)
    }

    pub fn set_level(&mut self, slot: EquipmentSlot, level: u32) {
        if level == 0 {
            self.levels.remove(&slot);
        } else {
            self.levels.insert(slot, level);
        }
    }

    pub fn multiplier(&self, slot: EquipmentSlot) -> f64 {
        enhancement_multiplier(self.level(slot))
    }
}

/// +5% per level on the slot's base and affix stats.
pub fn enhancement_multiplier(level: u32) -> f64 {
    1.0 + level as f64 * ENHANCEMENT_PERCENT_PER_LEVEL / 100.0
}

/// Stones needed to go from `current_level` to the next level.
pub fn strengthen_cost(current_level: u32) -> u64 {
    (current_level as u64 + 1) * ENHANCEMENT_COST_PER_LEVEL as u64
}

/// Spends stones to raise `slot` by one level. No-op when short on stones.
pub fn strengthen_slot(state: &mut GameState, slot: EquipmentSlot) -> bool {
    let level = state.enhancements.level(slot);
    let cost = strengthen_cost(level);
    if state.strengthen_stones < cost {
        state.add_log(format!(
            "Not enough strengthening stones for {} +{} (need {}, have {})",
            slot.name(),
            level + 1,
            cost,
            state.strengthen_stones
        ));
        return false;
    }

    state.strengthen_stones -= cost;
    state.enhancements.set_level(slot, level + 1);
    state.add_log(format!("{} strengthened to +{}", slot.name(), level + 1));
    tracing::debug!(slot = slot.name(), level = level + 1, cost, "slot strengthened");
    state.normalize_hp();
    true
}
