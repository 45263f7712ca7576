//! Offline progression.
//!
//! Time away is converted into simulated kills at a fixed rate. The result is
//! held as a pending claim until the player collects it explicitly.

use super::config::GameConfig;
use super::constants::*;
use super::game_state::GameState;
use crate::character::bestiary::record_kill;
use crate::character::experience::{grant_exp, kill_exp};
use crate::combat::types::CombatEvent;
use crate::items::drops::{drop_equipment, drop_skill};
use crate::items::types::Quality;
use crate::stages::data::MONSTERS;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rewards accumulated while the game was closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflineReward {
    pub minutes: u64,
    pub kills: u64,
    pub exp: u64,
    pub equipment: u64,
    pub skills: u64,
    /// Stage the kills are credited to.
    pub stage: u32,
}

impl OfflineReward {
    /// Rewards for `minutes` away at `stage`, after the cap.
    pub fn for_minutes(minutes: u64, stage: u32, config: &GameConfig) -> Self {
        let minutes = minutes.min(config.max_offline_minutes);
        let kills = minutes * OFFLINE_KILLS_PER_MINUTE;
        Self {
            minutes,
            kills,
            exp: kills.saturating_mul(kill_exp(stage, false)),
            equipment: kills * OFFLINE_EQUIPMENT_PERCENT / 100,
            skills: kills * OFFLINE_SKILL_PERCENT / 100,
            stage,
        }
    }
}

/// Rewards for a gap of `elapsed_seconds`, or `None` below the minimum.
pub fn compute_offline_reward(
    elapsed_seconds: i64,
    stage: u32,
    config: &GameConfig,
) -> Option<OfflineReward> {
    if elapsed_seconds <= config.min_offline_seconds {
        return None;
    }
    let minutes = (elapsed_seconds / 60) as u64;
    Some(OfflineReward::for_minutes(minutes, stage, config))
}

/// Folds the gap since `last_seen` into the pending claim and stamps `now`.
///
/// An unclaimed reward from an earlier gap is merged, still under the cap.
pub fn reconcile_offline(
    state: &mut GameState,
    now: i64,
    config: &GameConfig,
) -> Option<OfflineReward> {
    let previous = state.last_seen;
    state.last_seen = now;
    if previous <= 0 {
        return state.pending_offline.clone();
    }

    let Some(reward) = compute_offline_reward(now - previous, state.current_stage, config) else {
        return state.pending_offline.clone();
    };
    let merged = match state.pending_offline.take() {
        Some(pending) => {
            OfflineReward::for_minutes(pending.minutes + reward.minutes, state.current_stage, config)
        }
        None => reward,
    };

    tracing::info!(
        minutes = merged.minutes,
        kills = merged.kills,
        exp = merged.exp,
        "offline rewards pending"
    );
    state.add_log(format!(
        "Away for {} min: {} kills waiting to be claimed",
        merged.minutes, merged.kills
    ));
    state.pending_offline = Some(merged.clone());
    Some(merged)
}

/// Applies the pending claim: experience, loot, skills, and bestiary kills.
/// No-op when nothing is pending.
pub fn claim_offline_rewards(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    let Some(reward) = state.pending_offline.take() else {
        return events;
    };

    for level in grant_exp(state, reward.exp) {
        events.push(CombatEvent::LevelUp { level });
    }
    for _ in 0..reward.equipment {
        drop_equipment(state, reward.stage, Quality::Common, config, rng, &mut events);
    }
    for _ in 0..reward.skills {
        drop_skill(state, rng, &mut events);
    }
    for _ in 0..reward.kills {
        let monster = &MONSTERS[rng.gen_range(0..MONSTERS.len())];
        record_kill(&mut state.bestiary, monster);
    }

    state.add_log(format!(
        "Claimed offline rewards: {} kills, +{} exp",
        reward.kills, reward.exp
    ));
    tracing::info!(kills = reward.kills, exp = reward.exp, "offline rewards claimed");
    events.push(CombatEvent::OfflineRewardsClaimed {
        kills: reward.kills,
        exp: reward.exp,
    });
    events
}
