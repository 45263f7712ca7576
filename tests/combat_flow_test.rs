//! Integration test: full attack exchanges, wave clears, death and recovery.

use chrono::{Local, TimeZone};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::combat::logic::{attack, cast_skill};
use skirmish::combat::types::{CombatEvent, Enemy, EnemyRole, Wave};
use skirmish::core::timers::rest_tick;
use skirmish::stages::data::get_monster;
use skirmish::{Command, GameConfig, GameState, GameStore, MemoryStore};
use uuid::Uuid;

fn goblin(id: u128) -> Enemy {
    Enemy::new(Uuid::from_u128(id), get_monster("goblin").unwrap(), 1, EnemyRole::Regular)
}

fn strong_player() -> GameState {
    let mut state = GameState::new(0);
    state.cheat_bonus.attack = 5000;
    state.cheat_bonus.defense = 5000;
    state
}

/// Attacks until the wave is gone, capped to avoid spinning forever.
fn fight_out(state: &mut GameState, config: &GameConfig, rng: &mut ChaCha8Rng) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for _ in 0..100 {
        if state.wave.is_none() {
            break;
        }
        events.extend(attack(state, config, rng));
    }
    events
}

#[test]
fn test_crowd_wave_grants_bonus_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let config = GameConfig::default();
    let mut state = strong_player();
    state.wave = Some(Wave::new(vec![goblin(1), goblin(2), goblin(3)], false));

    let events = fight_out(&mut state, &config, &mut rng);

    let deaths = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::EnemyDied { .. }))
        .count();
    assert_eq!(deaths, 3);
    let clears: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::WaveCleared { bonus_exp } => Some(*bonus_exp),
            _ => None,
        })
        .collect();
    assert_eq!(clears, vec![10]);
    assert_eq!(state.exp, 3 * 20 + 10);
    assert_eq!(state.boss_progress, 3);
    assert_eq!(state.bestiary["goblin"].count, 3);
}

#[test]
fn test_single_target_leaves_rest_of_wave() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let config = GameConfig::default();
    let mut state = strong_player();
    state.wave = Some(Wave::new(vec![goblin(1), goblin(2)], false));

    attack(&mut state, &config, &mut rng);
    let wave = state.wave.as_ref().unwrap();
    assert_eq!(wave.enemies.len(), 1);
    assert_eq!(wave.enemies[0].id, Uuid::from_u128(2));
    assert_eq!(wave.enemies[0].hp, wave.enemies[0].max_hp);
}

#[test]
fn test_flame_storm_hits_whole_wave() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let config = GameConfig::default();
    let mut state = strong_player();
    state.owned_skills.insert("skill_flame_storm".to_string(), 1);
    state.equipped_skills.push("skill_flame_storm".to_string());
    state.wave = Some(Wave::new(vec![goblin(1), goblin(2), goblin(3)], false));

    let events = cast_skill(&mut state, "skill_flame_storm", &config, &mut rng);
    assert!(events.contains(&CombatEvent::SkillCast {
        skill: "skill_flame_storm"
    }));
    assert!(events.iter().any(|e| matches!(e, CombatEvent::WaveCleared { .. })));
    assert!(state.wave.is_none());
    assert_eq!(state.cooldowns.get("skill_flame_storm"), Some(&3));
}

#[test]
fn test_cooldowns_tick_with_attacks() {
    let mut rng = ChaCha8Rng::seed_from_u64(14);
    let config = GameConfig::default();
    let mut state = GameState::new(0);
    state.player_hp = 10_000;
    state.owned_skills.insert("skill_fireball".to_string(), 1);
    state.equipped_skills.push("skill_fireball".to_string());
    let titan = Enemy::new(Uuid::from_u128(9), get_monster("titan").unwrap(), 1, EnemyRole::Regular);
    state.wave = Some(Wave::new(vec![titan], false));

    assert!(!cast_skill(&mut state, "skill_fireball", &config, &mut rng).is_empty());
    attack(&mut state, &config, &mut rng);
    assert!(cast_skill(&mut state, "skill_fireball", &config, &mut rng).is_empty());
    attack(&mut state, &config, &mut rng);
    assert!(!cast_skill(&mut state, "skill_fireball", &config, &mut rng).is_empty());
}

#[test]
fn test_death_then_rest_restores_health() {
    let mut rng = ChaCha8Rng::seed_from_u64(15);
    let config = GameConfig::default();
    let mut state = GameState::new(0);
    state.auto_battle = true;
    state.player_hp = 1;
    let god = Enemy::new(Uuid::from_u128(1), get_monster("god").unwrap(), 1, EnemyRole::Regular);
    state.wave = Some(Wave::new(vec![god], false));

    let events = attack(&mut state, &config, &mut rng);
    assert!(events.contains(&CombatEvent::PlayerDied { can_revive: false }));
    assert!(state.resting);
    assert!(!state.auto_battle);
    assert!(attack(&mut state, &config, &mut rng).is_empty());

    let mut finished = false;
    for _ in 0..50 {
        finished |= rest_tick(&mut state, &config).contains(&CombatEvent::RestFinished);
    }
    assert!(finished);
    assert_eq!(state.player_hp, state.max_hp());
}

#[test]
fn test_auto_battle_session_advances_stages() {
    let now = Local.timestamp_opt(1_700_000_000, 0).unwrap();
    let mut store = GameStore::open(
        GameConfig::default(),
        MemoryStore::new(),
        ChaCha8Rng::seed_from_u64(16),
        now,
    );
    store.dispatch(Command::ActivateCheat, now);
    store.dispatch(Command::StartAutoBattle, now);
    for _ in 0..600 {
        store.advance(100, now);
    }

    let state = store.snapshot();
    assert!(state.max_stage_reached >= 2, "reached {}", state.max_stage_reached);
    assert!(state.level > 1);
    assert!(!state.bestiary.is_empty());
    assert!(state.player_hp <= store.stats().max_hp);
}
