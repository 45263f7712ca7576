use crate::character::bestiary::BestiaryEntry;
use crate::character::bonus::StatBonus;
use crate::character::checkin::CheckInRecord;
use crate::character::derived_stats::PlayerStats;
use crate::character::experience::exp_for_level;
use crate::combat::types::Wave;
use crate::core::constants::COMBAT_LOG_CAPACITY;
use crate::core::offline::OfflineReward;
use crate::items::drops::AutoDecompose;
use crate::items::enhancement::SlotEnhancements;
use crate::items::equipment::Equipped;
use crate::items::types::Item;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Rolling combat log; the oldest line is evicted once full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatLog {
    entries: VecDeque<String>,
    /// Lines pushed this session, evicted ones included.
    #[serde(skip)]
    pushed: u64,
}

impl CombatLog {
    pub fn push(&mut self, message: String) {
        while self.entries.len() >= COMBAT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
        self.pushed += 1;
    }

    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    /// The most recent `count` lines still held, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &String> {
        self.entries.iter().skip(self.entries.len().saturating_sub(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&String> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The whole persistent player aggregate.
///
/// IMPORTANT: the container is `#[serde(default)]`, so any field missing from
/// an older or partial snapshot falls back to `GameState::default()`. Add new
/// fields with a sensible default rather than breaking old saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub level: u32,
    pub exp: u64,
    pub exp_to_next: u64,
    pub player_hp: u32,
    pub equipped: Equipped,
    pub inventory: Vec<Item>,
    /// Skill id -> copies owned.
    pub owned_skills: BTreeMap<String, u32>,
    pub equipped_skills: Vec<String>,
    /// Remaining cooldown per active skill id; absent means ready.
    pub cooldowns: BTreeMap<String, u32>,
    pub bestiary: BTreeMap<String, BestiaryEntry>,
    pub cheat_bonus: StatBonus,
    pub cheat_used: bool,
    pub checkin: CheckInRecord,
    pub rare_bonus: StatBonus,
    pub enhancements: SlotEnhancements,
    pub strengthen_stones: u64,
    pub auto_decompose: AutoDecompose,
    pub current_stage: u32,
    pub max_stage_reached: u32,
    pub boss_progress: u32,
    pub monsters_killed: u64,
    pub auto_advance: bool,
    pub auto_battle: bool,
    pub resting: bool,
    pub rest_progress: f64,
    pub online_seconds: u64,
    pub can_revive: bool,
    /// Unix timestamp of the last online tick; 0 means never seen.
    pub last_seen: i64,
    pub pending_offline: Option<OfflineReward>,
    pub combat_log: CombatLog,
    /// Active wave (transient, never saved)
    #[serde(skip)]
    pub wave: Option<Wave>,
}

impl Default for GameState {
    fn default() -> Self {
        let mut state = Self {
            level: 1,
            exp: 0,
            exp_to_next: exp_for_level(1),
            player_hp: 0,
            equipped: Equipped::new(),
            inventory: Vec::new(),
            owned_skills: BTreeMap::new(),
            equipped_skills: Vec::new(),
            cooldowns: BTreeMap::new(),
            bestiary: BTreeMap::new(),
            cheat_bonus: StatBonus::ZERO,
            cheat_used: false,
            checkin: CheckInRecord::default(),
            rare_bonus: StatBonus::ZERO,
            enhancements: SlotEnhancements::default(),
            strengthen_stones: 0,
            auto_decompose: AutoDecompose::default(),
            current_stage: 1,
            max_stage_reached: 1,
            boss_progress: 0,
            monsters_killed: 0,
            auto_advance: true,
            auto_battle: false,
            resting: false,
            rest_progress: 0.0,
            online_seconds: 0,
            can_revive: false,
            last_seen: 0,
            pending_offline: None,
            combat_log: CombatLog::default(),
            wave: None,
        };
        state.heal_full();
        state
    }
}

impl GameState {
    /// Creates a fresh character first seen at `current_time`.
    pub fn new(current_time: i64) -> Self {
        Self {
            last_seen: current_time,
            ..Self::default()
        }
    }

    pub fn add_log(&mut self, message: impl Into<String>) {
        self.combat_log.push(message.into());
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats::calculate(self)
    }

    pub fn max_hp(&self) -> u32 {
        self.stats().max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.player_hp > 0
    }

    pub fn heal_full(&mut self) {
        self.player_hp = self.max_hp();
    }

    /// Clamps current HP into `[0, max_hp]`.
    pub fn normalize_hp(&mut self) {
        self.player_hp = self.player_hp.min(self.max_hp());
    }

    pub fn has_live_wave(&self) -> bool {
        self.wave.as_ref().is_some_and(|wave| wave.has_alive())
    }

    /// Repairs invariants after loading a possibly partial snapshot.
    pub fn normalize(&mut self) {
        self.level = self.level.max(1);
        self.exp_to_next = exp_for_level(self.level);
        self.current_stage = self.current_stage.max(1);
        self.max_stage_reached = self.max_stage_reached.max(self.current_stage);
        self.rest_progress = self.rest_progress.max(0.0);
        self.equipped_skills.retain(|id| self.owned_skills.get(id).copied().unwrap_or(0) > 0);
        let mut seen = BTreeSet::new();
        self.equipped_skills.retain(|id| seen.insert(id.clone()));
        self.cooldowns.retain(|_, remaining| *remaining > 0);
        self.normalize_hp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(1_700_000_000);
        assert_eq!(state.level, 1);
        assert_eq!(state.exp, 0);
        assert_eq!(state.exp_to_next, 100);
        assert_eq!(state.player_hp, state.max_hp());
        assert_eq!(state.current_stage, 1);
        assert_eq!(state.max_stage_reached, 1);
        assert!(state.auto_advance);
        assert!(!state.auto_battle);
        assert_eq!(state.last_seen, 1_700_000_000);
        assert!(state.wave.is_none());
    }

    #[test]
    fn test_combat_log_evicts_oldest() {
        let mut state = GameState::new(0);
        for i in 0..15 {
            state.add_log(format!("line {}", i));
        }
        assert_eq!(state.combat_log.len(), COMBAT_LOG_CAPACITY);
        assert_eq!(state.combat_log.iter().next().map(String::as_str), Some("line 5"));
        assert_eq!(state.combat_log.latest().map(String::as_str), Some("line 14"));
    }

    #[test]
    fn test_empty_snapshot_loads_defaults() {
        let state: GameState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(state.player_hp, 150);
        assert!(state.inventory.is_empty());
        assert!(state.equipped.iter_equipped().next().is_none());
        let stats = state.stats();
        assert_eq!(stats.max_hp, 150); // baseline 100 + level 1 bonus
        assert!((stats.crit_rate - 5.0).abs() < 1e-9);
        assert!((stats.crit_damage - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_snapshot_keeps_present_fields() {
        let state: GameState =
            serde_json::from_str(r#"{"level": 7, "current_stage": 3, "strengthen_stones": 12}"#)
                .unwrap();
        assert_eq!(state.level, 7);
        assert_eq!(state.current_stage, 3);
        assert_eq!(state.strengthen_stones, 12);
        assert!(state.auto_advance);
    }

    #[test]
    fn test_normalize_repairs_invariants() {
        let mut state = GameState::new(0);
        state.level = 0;
        state.current_stage = 4;
        state.max_stage_reached = 2;
        state.player_hp = 99_999;
        state.equipped_skills = vec!["skill_fireball".to_string()];
        state.normalize();
        assert_eq!(state.level, 1);
        assert_eq!(state.max_stage_reached, 4);
        assert_eq!(state.player_hp, state.max_hp());
        assert!(state.equipped_skills.is_empty(), "unowned skills are unequipped");
    }

    #[test]
    fn test_wave_is_not_serialized() {
        let state = GameState::new(0);
        let json = serde_json::to_string(&state).unwrap();
        assert!(!json.contains("\"wave\""));
    }
}
