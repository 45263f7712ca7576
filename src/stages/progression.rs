//! Wave composition, boss cadence, and stage selection.

use super::data::{boss_for_stage, MonsterType, MONSTERS, RARE_MONSTERS};
use crate::combat::types::{CombatEvent, Enemy, EnemyRole, Wave};
use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::items::generation::random_id;
use crate::items::types::Quality;
use rand::Rng;

/// Extra rewards rolled once a wave is cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveExtraDrops {
    pub equipment_chance: f64,
    pub skill_chance: f64,
    pub quality_floor: Quality,
}

pub fn wave_extra_drops(enemy_count: usize, is_boss: bool) -> WaveExtraDrops {
    if is_boss {
        return WaveExtraDrops {
            equipment_chance: 1.0,
            skill_chance: 1.0,
            quality_floor: Quality::from_index(BOSS_QUALITY_FLOOR),
        };
    }
    let (equipment_chance, skill_chance) = match enemy_count {
        0 | 1 => (0.0, 0.0),
        2 => (PAIR_WAVE_EQUIPMENT_CHANCE, 0.0),
        _ => (CROWD_WAVE_EQUIPMENT_CHANCE, CROWD_WAVE_SKILL_CHANCE),
    };
    WaveExtraDrops {
        equipment_chance,
        skill_chance,
        quality_floor: Quality::Common,
    }
}

fn random_monster(rng: &mut impl Rng) -> &'static MonsterType {
    &MONSTERS[rng.gen_range(0..MONSTERS.len())]
}

fn random_rare(rng: &mut impl Rng) -> &'static MonsterType {
    &RARE_MONSTERS[rng.gen_range(0..RARE_MONSTERS.len())]
}

pub fn build_normal_wave(stage: u32, rng: &mut impl Rng) -> Wave {
    let count = rng.gen_range(MIN_WAVE_SIZE..=MAX_WAVE_SIZE);
    let enemies = (0..count)
        .map(|_| {
            if rng.gen::<f64>() < RARE_MONSTER_CHANCE {
                Enemy::new(random_id(rng), random_rare(rng), stage, EnemyRole::Rare)
            } else {
                Enemy::new(random_id(rng), random_monster(rng), stage, EnemyRole::Regular)
            }
        })
        .collect();
    Wave::new(enemies, false)
}

pub fn build_boss_wave(stage: u32, config: &GameConfig, rng: &mut impl Rng) -> Wave {
    let mut enemies = Vec::with_capacity(config.boss_minion_count + 1);
    enemies.push(Enemy::new(
        random_id(rng),
        boss_for_stage(stage),
        stage,
        EnemyRole::BossLeader,
    ));
    for _ in 0..config.boss_minion_count {
        enemies.push(Enemy::new(random_id(rng), random_monster(rng), stage, EnemyRole::BossAdd));
    }
    Wave::new(enemies, true)
}

/// Spawns the next wave. No-op while a wave is alive, the player is down,
/// or the player is resting.
pub fn spawn_wave(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) -> Vec<CombatEvent> {
    if state.has_live_wave() || !state.is_alive() || state.resting {
        return Vec::new();
    }

    let stage = state.current_stage;
    let boss_ready = state.boss_progress >= config.monsters_per_boss
        && !state.wave.as_ref().is_some_and(|w| w.is_boss);

    let wave = if boss_ready {
        state.boss_progress = 0;
        let wave = build_boss_wave(stage, config, rng);
        state.add_log(format!(
            "Boss {} appears with {} minions!",
            boss_for_stage(stage).name,
            config.boss_minion_count
        ));
        tracing::info!(stage, boss = boss_for_stage(stage).id, "boss wave spawned");
        wave
    } else {
        let wave = build_normal_wave(stage, rng);
        let names: Vec<&str> = wave.enemies.iter().map(Enemy::name).collect();
        state.add_log(format!("Encountered {}", names.join(", ")));
        wave
    };

    let event = CombatEvent::WaveSpawned {
        enemies: wave.initial_count,
        is_boss: wave.is_boss,
    };
    tracing::debug!(stage, enemies = wave.initial_count, is_boss = wave.is_boss, "wave spawned");
    state.wave = Some(wave);
    vec![event]
}

/// Counts a kill toward the boss bar, capped at the threshold.
pub fn advance_boss_progress(state: &mut GameState, config: &GameConfig) {
    let was_full = state.boss_progress >= config.monsters_per_boss;
    state.boss_progress = (state.boss_progress + 1).min(config.monsters_per_boss);
    state.monsters_killed += 1;
    let fighting_boss = state.wave.as_ref().is_some_and(|w| w.is_boss);
    if !was_full && state.boss_progress >= config.monsters_per_boss && !fighting_boss {
        state.add_log("Boss bar full! The next wave summons the boss");
    }
}

/// Wraps up a cleared boss wave: optionally advance, reset the bar, heal.
/// Returns the stage advanced to, if any.
pub fn finish_boss_wave(state: &mut GameState) -> Option<u32> {
    let advanced = if state.auto_advance {
        state.current_stage += 1;
        state.max_stage_reached = state.max_stage_reached.max(state.current_stage);
        state.add_log(format!("Boss defeated! Advancing to stage {}", state.current_stage));
        tracing::info!(stage = state.current_stage, "stage advanced");
        Some(state.current_stage)
    } else {
        state.add_log("Boss defeated! Staying on this stage");
        None
    };
    state.boss_progress = 0;
    state.monsters_killed = 0;
    state.heal_full();
    advanced
}

/// Moves to `stage` if it has been reached before. Clears the wave,
/// resets boss progress, and heals.
pub fn select_stage(state: &mut GameState, stage: u32) -> bool {
    if stage == 0 || stage > state.max_stage_reached {
        return false;
    }
    state.current_stage = stage;
    state.wave = None;
    state.boss_progress = 0;
    state.monsters_killed = 0;
    state.heal_full();
    state.add_log(format!("Entered stage {}", stage));
    tracing::debug!(stage, "stage selected");
    true
}

pub fn next_stage(state: &mut GameState) -> bool {
    select_stage(state, state.current_stage + 1)
}

pub fn set_auto_advance(state: &mut GameState, enabled: bool) {
    state.auto_advance = enabled;
    state.add_log(if enabled {
        "Auto-advance enabled"
    } else {
        "Auto-advance disabled"
    });
}
