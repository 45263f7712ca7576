use super::data::{get_skill, Skill, SkillKind, SKILLS};
use crate::core::config::GameConfig;
use crate::core::game_state::GameState;
use rand::Rng;

/// Uniform pick from the full catalog.
pub fn random_skill_drop(rng: &mut impl Rng) -> &'static Skill {
    &SKILLS[rng.gen_range(0..SKILLS.len())]
}

/// Adds one copy of `skill` to the owned multiset.
pub fn grant_skill(state: &mut GameState, skill: &Skill) {
    *state.owned_skills.entry(skill.id.to_string()).or_insert(0) += 1;
}

pub fn skill_slot_limit(state: &GameState, config: &GameConfig) -> usize {
    config.skill_slots(state.checkin.extra_skill_slots as usize)
}

/// Equips an owned skill. No-op for unknown, unowned, or already-equipped
/// skills; full slots additionally log a message.
pub fn equip_skill(state: &mut GameState, skill_id: &str, config: &GameConfig) -> bool {
    let Some(skill) = get_skill(skill_id) else {
        return false;
    };
    if state.owned_skills.get(skill_id).copied().unwrap_or(0) == 0 {
        return false;
    }
    if state.equipped_skills.iter().any(|id| id == skill_id) {
        return false;
    }
    let limit = skill_slot_limit(state, config);
    if state.equipped_skills.len() >= limit {
        state.add_log(format!("Skill slots full ({}/{}), cannot equip {}", limit, limit, skill.name));
        return false;
    }

    state.equipped_skills.push(skill_id.to_string());
    state.add_log(format!("Equipped skill {}", skill.name));
    if skill.is_passive() {
        state.normalize_hp();
    }
    true
}

pub fn unequip_skill(state: &mut GameState, skill_id: &str) -> bool {
    let Some(pos) = state.equipped_skills.iter().position(|id| id == skill_id) else {
        return false;
    };
    state.equipped_skills.remove(pos);
    if let Some(skill) = get_skill(skill_id) {
        state.add_log(format!("Unequipped skill {}", skill.name));
    }
    // Dropping a passive HP bonus may push current HP over the new maximum.
    state.normalize_hp();
    true
}

/// Number of enemies a basic attack hits, from the best equipped multi-target passive.
pub fn attack_target_count(state: &GameState) -> usize {
    state
        .equipped_skills
        .iter()
        .filter_map(|id| match get_skill(id).map(|skill| skill.kind) {
            Some(SkillKind::Passive(effect)) => effect.multi_target,
            _ => None,
        })
        .max()
        .unwrap_or(1)
        .max(1)
}

pub fn cooldown_remaining(state: &GameState, skill_id: &str) -> u32 {
    state.cooldowns.get(skill_id).copied().unwrap_or(0)
}

/// Decrements every running cooldown by one, dropping finished ones.
pub fn tick_cooldowns(state: &mut GameState) {
    for remaining in state.cooldowns.values_mut() {
        *remaining = remaining.saturating_sub(1);
    }
    state.cooldowns.retain(|_, remaining| *remaining > 0);
}
