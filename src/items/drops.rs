use super::generation::generate_random_equipment;
use super::types::{Item, Quality};
use crate::combat::types::{CombatEvent, EnemyRole};
use crate::core::config::GameConfig;
use crate::core::constants::{
    BOSS_LEADER_DROP_RATE, BOSS_QUALITY_FLOOR, RARE_QUALITY_FLOOR, SKILL_DROP_RATE,
};
use crate::core::game_state::GameState;
use crate::skills::logic::{grant_skill, random_skill_drop};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Policy for destroying low-value loot on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoDecompose {
    pub enabled: bool,
    /// Highest quality that gets decomposed.
    pub max_quality: Quality,
    /// Highest item level that gets decomposed.
    pub max_level: u32,
}

impl Default for AutoDecompose {
    fn default() -> Self {
        Self {
            enabled: false,
            max_quality: Quality::Common,
            max_level: u32::MAX,
        }
    }
}

impl AutoDecompose {
    pub fn matches(&self, item: &Item) -> bool {
        self.enabled && item.quality <= self.max_quality && item.level <= self.max_level
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootOutcome {
    Stored,
    Decomposed { stones: u64 },
    Lost,
}

/// Equipment drop chance and quality floor for an enemy role.
pub fn equipment_drop_profile(role: EnemyRole, config: &GameConfig) -> (f64, Quality) {
    match role {
        EnemyRole::BossLeader => (BOSS_LEADER_DROP_RATE, Quality::from_index(BOSS_QUALITY_FLOOR)),
        EnemyRole::Rare => (1.0, Quality::from_index(RARE_QUALITY_FLOOR)),
        EnemyRole::Regular | EnemyRole::BossAdd => (config.equipment_drop_rate, Quality::Common),
    }
}

pub fn skill_drop_chance(role: EnemyRole) -> f64 {
    match role {
        EnemyRole::Rare => 1.0,
        _ => SKILL_DROP_RATE,
    }
}

/// Strengthening stones yielded by destroying `item`.
pub fn decompose_value(item: &Item) -> u64 {
    item.quality.index() as u64 + 1
}

/// Hands a newly dropped item to the player, applying the auto-decompose
/// policy and inventory capacity.
pub fn grant_item(state: &mut GameState, item: Item, config: &GameConfig) -> LootOutcome {
    if state.auto_decompose.matches(&item) {
        let stones = decompose_value(&item);
        state.strengthen_stones += stones;
        state.add_log(format!("Auto-decomposed {} (+{} stones)", item.name, stones));
        return LootOutcome::Decomposed { stones };
    }
    if state.inventory.len() >= config.inventory_capacity {
        state.add_log(format!("Inventory full, {} was lost", item.name));
        tracing::debug!(item = %item.name, "loot lost to full inventory");
        return LootOutcome::Lost;
    }
    state.add_log(format!("Obtained {}", item.name));
    state.inventory.push(item);
    LootOutcome::Stored
}

/// Generates and grants one equipment drop, recording the outcome.
pub fn drop_equipment(
    state: &mut GameState,
    stage: u32,
    min_quality: Quality,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    let item = generate_random_equipment(stage, min_quality, rng);
    let name = item.name.clone();
    let quality = item.quality;
    match grant_item(state, item, config) {
        LootOutcome::Stored => events.push(CombatEvent::ItemDropped { name, quality }),
        LootOutcome::Decomposed { stones } => {
            events.push(CombatEvent::ItemDecomposed { name, stones })
        }
        LootOutcome::Lost => events.push(CombatEvent::ItemLost { name }),
    }
}

/// Grants one random skill copy.
pub fn drop_skill(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
    let skill = random_skill_drop(rng);
    grant_skill(state, skill);
    state.add_log(format!("Learned skill {}", skill.name));
    events.push(CombatEvent::SkillDropped { skill: skill.id });
}

/// Destroys one inventory item for stones. No-op for unknown ids.
pub fn decompose_item(state: &mut GameState, item_id: Uuid) -> Option<u64> {
    let pos = state.inventory.iter().position(|item| item.id == item_id)?;
    let item = state.inventory.remove(pos);
    let stones = decompose_value(&item);
    state.strengthen_stones += stones;
    state.add_log(format!("Decomposed {} (+{} stones)", item.name, stones));
    Some(stones)
}

/// Destroys every inventory item at or below both limits.
/// Returns `(items destroyed, stones gained)`.
pub fn decompose_batch(state: &mut GameState, max_quality: Quality, max_level: u32) -> (usize, u64) {
    let (doomed, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut state.inventory)
        .into_iter()
        .partition(|item| item.quality <= max_quality && item.level <= max_level);
    state.inventory = kept;

    let stones: u64 = doomed.iter().map(decompose_value).sum();
    if !doomed.is_empty() {
        state.strengthen_stones += stones;
        state.add_log(format!("Decomposed {} items (+{} stones)", doomed.len(), stones));
    }
    (doomed.len(), stones)
}
