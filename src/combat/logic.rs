use super::math::{
    heal_amount, monster_hit_damage, player_hit_damage, roll_crit, skill_damage,
};
use super::types::{CombatEvent, Enemy, EnemyRole};
use crate::character::bestiary::record_kill;
use crate::character::experience::{grant_exp, kill_exp, wave_bonus_exp};
use crate::core::config::GameConfig;
use crate::core::game_state::GameState;
use crate::items::drops::{drop_equipment, drop_skill, equipment_drop_profile, skill_drop_chance};
use crate::skills::data::{get_skill, ActiveEffect, SkillKind, TargetMode};
use crate::skills::logic::{attack_target_count, cooldown_remaining, tick_cooldowns};
use crate::stages::data::InnateSkill;
use crate::stages::progression::{
    advance_boss_progress, finish_boss_wave, spawn_wave, wave_extra_drops,
};
use rand::Rng;
use uuid::Uuid;

/// One attack exchange: the player hits, cooldowns tick, defeats resolve,
/// then the primary target counters.
///
/// No-op when the player is down, resting, or has nothing to fight.
pub fn attack(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    if !state.is_alive() || state.resting {
        return events;
    }
    let count = attack_target_count(state);
    let targets = match &state.wave {
        Some(wave) => wave.front_targets(count),
        None => return events,
    };
    let Some(&primary) = targets.first() else {
        return events;
    };

    let stats = state.stats();
    let mut hits = Vec::with_capacity(targets.len());
    for id in &targets {
        let was_crit = roll_crit(stats.crit_rate, rng);
        let Some(enemy) = state.wave.as_mut().and_then(|w| w.get_mut(*id)) else {
            continue;
        };
        let mut damage = player_hit_damage(stats.attack, enemy.defense, was_crit, stats.crit_damage);
        if let Some(InnateSkill::Guard { chance, reduction }) = enemy.monster.innate {
            if rng.gen::<f64>() < chance {
                damage = ((damage as f64 * (1.0 - reduction)).floor() as u32).max(1);
                events.push(CombatEvent::EnemyGuarded { enemy: *id });
            }
        }
        enemy.take_damage(damage);
        events.push(CombatEvent::PlayerAttack {
            target: *id,
            damage,
            was_crit,
        });
        let reborn = try_rebirth(enemy, rng);
        hits.push((enemy.name(), damage, was_crit, reborn));
        if reborn {
            events.push(CombatEvent::EnemyReborn { enemy: *id });
        }
    }
    for (name, damage, was_crit, reborn) in hits {
        let crit = if was_crit { " (critical)" } else { "" };
        state.add_log(format!("You hit {} for {}{}", name, damage, crit));
        if reborn {
            state.add_log(format!("{} rises from the ashes!", name));
        }
    }

    tick_cooldowns(state);
    resolve_defeats(state, config, rng, &mut events);
    counter_attack(state, primary, rng, &mut events);
    events
}

/// Casts an equipped, ready active skill. No-op otherwise, and for damage
/// or control skills with nothing to target.
pub fn cast_skill(
    state: &mut GameState,
    skill_id: &str,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    if !state.is_alive() || !state.equipped_skills.iter().any(|id| id == skill_id) {
        return events;
    }
    let Some(skill) = get_skill(skill_id) else {
        return events;
    };
    let SkillKind::Active { cooldown, effect } = skill.kind else {
        return events;
    };
    if cooldown_remaining(state, skill_id) > 0 {
        return events;
    }

    match effect {
        ActiveEffect::Heal { percent } => {
            let max_hp = state.max_hp();
            let before = state.player_hp;
            state.player_hp = before.saturating_add(heal_amount(max_hp, percent)).min(max_hp);
            let amount = state.player_hp - before;
            events.push(CombatEvent::SkillCast { skill: skill.id });
            events.push(CombatEvent::PlayerHealed { amount });
            state.add_log(format!("{} restores {} HP", skill.name, amount));
        }
        ActiveEffect::Control { skip_turns } => {
            let Some(target) = state.wave.as_ref().and_then(|w| w.front_targets(1).first().copied()) else {
                return events;
            };
            let Some(enemy) = state.wave.as_mut().and_then(|w| w.get_mut(target)) else {
                return events;
            };
            enemy.skip_turns += skip_turns;
            let name = enemy.name();
            events.push(CombatEvent::SkillCast { skill: skill.id });
            events.push(CombatEvent::EnemyStunned { enemy: target });
            state.add_log(format!("{} disables {} for {} turn(s)", skill.name, name, skip_turns));
        }
        ActiveEffect::Damage { multiplier, target } => {
            let count = match target {
                TargetMode::Single => 1,
                TargetMode::Count(n) => n,
                TargetMode::All => usize::MAX,
            };
            let targets = match &state.wave {
                Some(wave) => wave.front_targets(count),
                None => Vec::new(),
            };
            if targets.is_empty() {
                return events;
            }
            events.push(CombatEvent::SkillCast { skill: skill.id });
            let attack = state.stats().attack;
            let mut total = 0u32;
            for id in &targets {
                let Some(enemy) = state.wave.as_mut().and_then(|w| w.get_mut(*id)) else {
                    continue;
                };
                let damage = skill_damage(attack, multiplier, enemy.defense);
                enemy.take_damage(damage);
                total = total.saturating_add(damage);
                events.push(CombatEvent::PlayerAttack {
                    target: *id,
                    damage,
                    was_crit: false,
                });
                if try_rebirth(enemy, rng) {
                    events.push(CombatEvent::EnemyReborn { enemy: *id });
                }
            }
            state.add_log(format!(
                "{} hits {} target(s) for {} total damage",
                skill.name,
                targets.len(),
                total
            ));
        }
    }

    state.cooldowns.insert(skill.id.to_string(), cooldown);
    tracing::debug!(skill = skill.id, cooldown, "skill cast");
    resolve_defeats(state, config, rng, &mut events);
    events
}

/// Phoenix-style revival; true when the enemy came back.
fn try_rebirth(enemy: &mut Enemy, rng: &mut impl Rng) -> bool {
    if enemy.is_alive() || enemy.reborn {
        return false;
    }
    let Some(InnateSkill::Rebirth { chance, hp_ratio }) = enemy.monster.innate else {
        return false;
    };
    if rng.gen::<f64>() >= chance {
        return false;
    }
    enemy.reborn = true;
    enemy.hp = ((enemy.max_hp as f64 * hp_ratio).floor() as u32).max(1);
    true
}

/// Resolves every enemy at 0 HP exactly once, in wave order.
fn resolve_defeats(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    while let Some(enemy) = state
        .wave
        .as_ref()
        .and_then(|w| w.enemies.iter().find(|e| !e.is_alive()).cloned())
    {
        resolve_defeat(state, &enemy, config, rng, events);
    }
}

fn resolve_defeat(
    state: &mut GameState,
    enemy: &Enemy,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    let stage = state.current_stage;

    let (drop_chance, quality_floor) = equipment_drop_profile(enemy.role, config);
    if rng.gen::<f64>() < drop_chance {
        drop_equipment(state, stage, quality_floor, config, rng, events);
    }

    if rng.gen::<f64>() < skill_drop_chance(enemy.role) {
        drop_skill(state, rng, events);
    }

    if let Some(reward) = enemy.monster.rare_reward {
        state.rare_bonus += reward;
        state.add_log(format!("Rare kill! {} grants {}", enemy.name(), reward.summary()));
        events.push(CombatEvent::RareBonusGranted {
            monster: enemy.monster.id,
        });
        tracing::info!(monster = enemy.monster.id, "rare monster defeated");
    }

    if record_kill(&mut state.bestiary, enemy.monster) {
        state.add_log(format!("New bestiary entry: {}", enemy.name()));
    }

    let exp = kill_exp(stage, enemy.is_boss_leader());
    state.add_log(format!("Defeated {} (+{} exp)", enemy.name(), exp));
    events.push(CombatEvent::EnemyDied {
        enemy: enemy.id,
        exp_gained: exp,
    });
    for level in grant_exp(state, exp) {
        events.push(CombatEvent::LevelUp { level });
    }

    let boss_wave = state.wave.as_ref().is_some_and(|w| w.is_boss);
    if !boss_wave || enemy.role == EnemyRole::BossAdd {
        advance_boss_progress(state, config);
    }

    let cleared = match state.wave.as_mut() {
        Some(wave) => {
            wave.remove(enemy.id);
            wave.enemies.is_empty()
        }
        None => false,
    };
    if cleared {
        complete_wave(state, config, rng, events);
    }
}

/// Wave-completion bonus: extra exp, extra drops, and the boss transition.
fn complete_wave(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    let Some(wave) = state.wave.take() else {
        return;
    };
    let stage = state.current_stage;

    let bonus_exp = wave_bonus_exp(stage, wave.initial_count, wave.is_boss);
    if bonus_exp > 0 {
        state.add_log(format!(
            "Wave bonus: +{} exp ({} enemies)",
            bonus_exp, wave.initial_count
        ));
        for level in grant_exp(state, bonus_exp) {
            events.push(CombatEvent::LevelUp { level });
        }
    }
    events.push(CombatEvent::WaveCleared { bonus_exp });

    let extra = wave_extra_drops(wave.initial_count, wave.is_boss);
    if extra.equipment_chance > 0.0 && rng.gen::<f64>() < extra.equipment_chance {
        drop_equipment(state, stage, extra.quality_floor, config, rng, events);
    }
    if extra.skill_chance > 0.0 && rng.gen::<f64>() < extra.skill_chance {
        drop_skill(state, rng, events);
    }

    if wave.is_boss {
        let advanced_to = finish_boss_wave(state);
        events.push(CombatEvent::BossDefeated { advanced_to });
        if let Some(stage) = advanced_to {
            events.push(CombatEvent::StageChanged { stage });
        }
    }
}

/// Damage multiplier and lifesteal ratio from the enemy's innate skill for this counter.
fn innate_multiplier(enemy: &Enemy, rng: &mut impl Rng) -> (f64, f64) {
    match enemy.monster.innate {
        Some(InnateSkill::Strike {
            chance,
            multiplier,
            lifesteal,
        }) if rng.gen::<f64>() < chance => (multiplier, lifesteal),
        Some(InnateSkill::Enrage { hp_ratio, multiplier })
            if (enemy.hp as f64) < enemy.max_hp as f64 * hp_ratio =>
        {
            (multiplier, 0.0)
        }
        Some(InnateSkill::Periodic { every, multiplier }) if every > 0 && enemy.counters % every == 0 => {
            (multiplier, 0.0)
        }
        _ => (1.0, 0.0),
    }
}

fn counter_attack(
    state: &mut GameState,
    primary: Uuid,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    if !state.is_alive() {
        return;
    }
    let player_defense = state.stats().defense;
    let Some(enemy) = state.wave.as_mut().and_then(|w| w.get_mut(primary)) else {
        return;
    };
    if !enemy.is_alive() {
        return;
    }
    let name = enemy.name();

    if enemy.skip_turns > 0 {
        enemy.skip_turns -= 1;
        events.push(CombatEvent::EnemyStunned { enemy: primary });
        state.add_log(format!("{} is unable to act", name));
        return;
    }

    enemy.counters += 1;
    let (multiplier, lifesteal) = innate_multiplier(enemy, rng);
    let was_crit = roll_crit(enemy.crit_rate, rng);
    let damage = monster_hit_damage(enemy.attack, player_defense, multiplier, was_crit, enemy.crit_damage);
    if lifesteal > 0.0 {
        enemy.heal((damage as f64 * lifesteal).floor() as u32);
    }

    state.player_hp = state.player_hp.saturating_sub(damage);
    events.push(CombatEvent::EnemyAttack {
        attacker: primary,
        damage,
        was_crit,
    });
    let crit = if was_crit { " (critical)" } else { "" };
    state.add_log(format!("{} hits you for {}{}", name, damage, crit));

    if state.player_hp == 0 {
        handle_player_death(state, events);
    }
}

/// Ends the fight. Without revive eligibility the player is sent to rest.
fn handle_player_death(state: &mut GameState, events: &mut Vec<CombatEvent>) {
    state.wave = None;
    state.auto_battle = false;
    if state.can_revive {
        state.add_log("You have fallen! A revive is available");
    } else {
        state.resting = true;
        state.rest_progress = 0.0;
        state.add_log("You have fallen! Resting to recover");
    }
    tracing::info!(stage = state.current_stage, can_revive = state.can_revive, "player died");
    events.push(CombatEvent::PlayerDied {
        can_revive: state.can_revive,
    });
}

/// Spends the revive earned by online time: full HP, resume auto-battle.
/// No-op without eligibility or while alive.
pub fn revive(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) -> Vec<CombatEvent> {
    if !state.can_revive || state.is_alive() {
        return Vec::new();
    }
    state.can_revive = false;
    state.online_seconds = 0;
    state.resting = false;
    state.rest_progress = 0.0;
    state.heal_full();
    state.auto_battle = true;
    state.add_log("Revived at full health!");
    tracing::info!("player revived");

    let mut events = vec![CombatEvent::Revived];
    events.extend(spawn_wave(state, config, rng));
    events
}
