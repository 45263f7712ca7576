//! Tunable game parameters.
//!
//! Defaults mirror [`crate::core::constants`]; every field can be overridden
//! from the environment with a `SKIRMISH_*` variable.

use super::constants::*;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Maximum number of unequipped items held at once.
    pub inventory_capacity: usize,
    /// Probability (0.0-1.0) that a regular monster drops equipment.
    pub equipment_drop_rate: f64,
    /// Number of regular monsters escorting a boss leader.
    pub boss_minion_count: usize,
    /// Kills required to fill the boss-progress bar.
    pub monsters_per_boss: u32,
    /// Skill slots before check-in rewards.
    pub base_skill_slots: usize,
    pub rest_duration: f64,
    pub rest_progress_per_tick: f64,
    pub auto_battle_interval_ms: u64,
    pub rest_tick_interval_ms: u64,
    pub online_tick_interval_ms: u64,
    /// Online seconds after which a free revive becomes available.
    pub revive_online_seconds: u64,
    pub min_offline_seconds: i64,
    pub max_offline_minutes: u64,
    /// Explicit save file location; `None` uses the platform config directory.
    pub save_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: INVENTORY_CAPACITY,
            equipment_drop_rate: EQUIPMENT_DROP_RATE,
            boss_minion_count: BOSS_MINION_COUNT,
            monsters_per_boss: MONSTERS_PER_BOSS,
            base_skill_slots: BASE_SKILL_SLOTS,
            rest_duration: REST_DURATION,
            rest_progress_per_tick: REST_PROGRESS_PER_TICK,
            auto_battle_interval_ms: AUTO_BATTLE_INTERVAL_MS,
            rest_tick_interval_ms: REST_TICK_INTERVAL_MS,
            online_tick_interval_ms: ONLINE_TICK_INTERVAL_MS,
            revive_online_seconds: REVIVE_ONLINE_SECONDS,
            min_offline_seconds: MIN_OFFLINE_SECONDS,
            max_offline_minutes: MAX_OFFLINE_MINUTES,
            save_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("SKIRMISH_INVENTORY_CAPACITY") {
            config.inventory_capacity = capacity;
        }
        if let Some(rate) = read_env::<f64>("SKIRMISH_EQUIPMENT_DROP_RATE") {
            config.equipment_drop_rate = rate.clamp(0.0, 1.0);
        }
        if let Some(count) = read_env::<usize>("SKIRMISH_BOSS_MINION_COUNT") {
            config.boss_minion_count = count;
        }
        if let Some(kills) = read_env::<u32>("SKIRMISH_MONSTERS_PER_BOSS") {
            config.monsters_per_boss = kills.max(1);
        }
        if let Some(slots) = read_env::<usize>("SKIRMISH_BASE_SKILL_SLOTS") {
            config.base_skill_slots = slots;
        }

        // Timers
        if let Some(ms) = read_env::<u64>("SKIRMISH_AUTO_BATTLE_MS") {
            config.auto_battle_interval_ms = ms.max(1);
        }
        if let Some(ms) = read_env::<u64>("SKIRMISH_REST_TICK_MS") {
            config.rest_tick_interval_ms = ms.max(1);
        }
        if let Some(seconds) = read_env::<u64>("SKIRMISH_REVIVE_SECONDS") {
            config.revive_online_seconds = seconds;
        }
        if let Some(minutes) = read_env::<u64>("SKIRMISH_MAX_OFFLINE_MINUTES") {
            config.max_offline_minutes = minutes;
        }

        if let Ok(path) = env::var("SKIRMISH_SAVE_PATH") {
            if !path.is_empty() {
                config.save_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Skill slots available with `extra` check-in slots earned.
    pub fn skill_slots(&self, extra: usize) -> usize {
        self.base_skill_slots + extra
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!(config.inventory_capacity, 100);
        assert_eq!(config.boss_minion_count, 2);
        assert_eq!(config.monsters_per_boss, 10);
        assert_eq!(config.base_skill_slots, 3);
        assert_eq!(config.auto_battle_interval_ms, 1000);
        assert_eq!(config.rest_tick_interval_ms, 100);
        assert_eq!(config.revive_online_seconds, 1800);
        assert_eq!(config.max_offline_minutes, 1440);
        assert!((config.rest_duration - 5.0).abs() < f64::EPSILON);
        assert!((config.equipment_drop_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_skill_slots_include_extra() {
        let config = GameConfig::default();
        assert_eq!(config.skill_slots(0), 3);
        assert_eq!(config.skill_slots(2), 5);
    }

    #[test]
    fn test_read_env_rejects_garbage() {
        assert_eq!(read_env::<u32>("SKIRMISH_TEST_UNSET_VARIABLE_1234"), None);
    }
}
