use super::types::{AffixKind, EquipmentSlot, Item, Quality};
use crate::core::constants::{AFFIX_ROLL_MAX, AFFIX_ROLL_MIN, ITEM_LEVEL_SCALING_STEP};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Cumulative quality thresholds: 50% / 25% / 15% / 7% / 2.5% / 0.5%.
const QUALITY_THRESHOLDS: [f64; 5] = [0.5, 0.75, 0.90, 0.97, 0.995];

/// Rolls a quality tier from the base distribution.
pub fn roll_quality(rng: &mut impl Rng) -> Quality {
    let roll = rng.gen::<f64>();
    let index = QUALITY_THRESHOLDS
        .iter()
        .position(|threshold| roll < *threshold)
        .unwrap_or(QUALITY_THRESHOLDS.len());
    Quality::from_index(index)
}

pub fn roll_random_slot(rng: &mut impl Rng) -> EquipmentSlot {
    EquipmentSlot::ALL[rng.gen_range(0..EquipmentSlot::ALL.len())]
}

/// Stat scaling for an item level: 1.0 at level 1, +10% per level after.
pub fn level_scale(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * ITEM_LEVEL_SCALING_STEP
}

/// Fresh identifier drawn from the injected rng so seeded runs stay reproducible.
pub fn random_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Generates an item for `slot` at `level`, never below `min_quality`.
pub fn generate_equipment(
    slot: EquipmentSlot,
    level: u32,
    min_quality: Quality,
    rng: &mut impl Rng,
) -> Item {
    let quality = roll_quality(rng).max(min_quality);
    let level = level.max(1);
    let factor = level_scale(level) * quality.multiplier();
    let base = slot.base_stats().scaled(factor);
    let affixes = generate_affixes(slot, quality, level, rng);

    Item {
        id: random_id(rng),
        slot,
        quality,
        level,
        name: format!("{}{}", quality.name(), slot.name()),
        base,
        affixes,
    }
}

/// Generates an item for a random slot.
pub fn generate_random_equipment(level: u32, min_quality: Quality, rng: &mut impl Rng) -> Item {
    let slot = roll_random_slot(rng);
    generate_equipment(slot, level, min_quality, rng)
}

fn generate_affixes(
    slot: EquipmentSlot,
    quality: Quality,
    level: u32,
    rng: &mut impl Rng,
) -> BTreeMap<AffixKind, u32> {
    let (min, max) = quality.affix_range();
    let pool = slot.affix_pool();
    let count = rng.gen_range(min..=max).min(pool.len());

    let scale = level_scale(level) * quality.multiplier();
    let mut affixes = BTreeMap::new();
    let chosen: Vec<AffixKind> = pool.choose_multiple(rng, count).copied().collect();
    for kind in chosen {
        let roll = rng.gen_range(AFFIX_ROLL_MIN..AFFIX_ROLL_MAX);
        let value = (kind.base_value() * scale * roll).floor() as u32;
        affixes.insert(kind, value);
    }
    affixes
}
