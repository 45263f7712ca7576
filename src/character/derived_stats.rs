use super::bestiary::bestiary_bonus;
use super::bonus::StatBonus;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::skills::data::{get_skill, SkillKind};

/// Effective combat stats for the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
}

impl PlayerStats {
    /// Aggregates every bonus source. Pure; called before each combat step.
    pub fn calculate(state: &GameState) -> Self {
        let mut total = level_bonus(state.level);
        total += equipment_bonus(state);
        total += bestiary_bonus(&state.bestiary);
        total += state.cheat_bonus;
        total += state.checkin.bonus;
        total += state.rare_bonus;
        total += passive_skill_bonus(&state.equipped_skills);

        Self {
            attack: total.attack,
            defense: total.defense,
            max_hp: BASE_PLAYER_HP.saturating_add(total.hp),
            crit_rate: BASE_CRIT_RATE + total.crit_rate,
            crit_damage: BASE_CRIT_DAMAGE + total.crit_damage,
        }
    }
}

/// Level-derived base values.
pub fn level_bonus(level: u32) -> StatBonus {
    let above_first = level.saturating_sub(1) as f64;
    StatBonus {
        attack: level.saturating_mul(ATTACK_PER_LEVEL),
        defense: level.saturating_mul(DEFENSE_PER_LEVEL),
        hp: level.saturating_mul(HP_PER_LEVEL),
        crit_rate: (above_first * CRIT_RATE_PER_LEVEL).min(MAX_LEVEL_CRIT_RATE_BONUS),
        crit_damage: above_first * CRIT_DAMAGE_PER_LEVEL,
    }
}

fn equipment_bonus(state: &GameState) -> StatBonus {
    let mut total = StatBonus::ZERO;
    for item in state.equipped.iter_equipped() {
        total += item.stat_contribution(state.enhancements.multiplier(item.slot));
    }
    total
}

fn passive_skill_bonus(equipped_skills: &[String]) -> StatBonus {
    let mut total = StatBonus::ZERO;
    for id in equipped_skills {
        if let Some(SkillKind::Passive(effect)) = get_skill(id).map(|skill| &skill.kind) {
            total += effect.bonus();
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::bestiary::BestiaryEntry;
    use crate::items::types::{EquipmentSlot, Item, Quality};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn weapon() -> Item {
        Item {
            id: Uuid::nil(),
            slot: EquipmentSlot::Weapon,
            quality: Quality::Common,
            level: 1,
            name: "普通武器".to_string(),
            base: EquipmentSlot::Weapon.base_stats(),
            affixes: BTreeMap::new(),
        }
    }

    #[test]
    fn test_level_one_baseline() {
        let stats = PlayerStats::calculate(&GameState::new(0));
        assert_eq!(stats.attack, 5);
        assert_eq!(stats.defense, 3);
        assert_eq!(stats.max_hp, 150);
        assert!((stats.crit_rate - 5.0).abs() < 1e-9);
        assert!((stats.crit_damage - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_scaling() {
        let mut state = GameState::new(0);
        state.level = 11;
        let stats = PlayerStats::calculate(&state);
        assert_eq!(stats.attack, 55);
        assert_eq!(stats.defense, 33);
        assert_eq!(stats.max_hp, 100 + 550);
        assert!((stats.crit_rate - 7.0).abs() < 1e-9);
        assert!((stats.crit_damage - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_crit_rate_capped() {
        let bonus = level_bonus(1000);
        assert!((bonus.crit_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_equipment_adds_stats() {
        let mut state = GameState::new(0);
        state.equipped.replace(weapon());
        let stats = PlayerStats::calculate(&state);
        assert_eq!(stats.attack, 20);
        assert!((stats.crit_rate - 8.0).abs() < 1e-9);
        assert!((stats.crit_damage - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_enhancement_scales_slot() {
        let mut state = GameState::new(0);
        state.equipped.replace(weapon());
        state.enhancements.set_level(EquipmentSlot::Weapon, 10);
        let stats = PlayerStats::calculate(&state);
        assert_eq!(stats.attack, 5 + 22); // floor(15 * 1.5)
    }

    #[test]
    fn test_all_additive_sources() {
        let mut state = GameState::new(0);
        state.bestiary.insert(
            "goblin".to_string(),
            BestiaryEntry {
                name: "哥布林".to_string(),
                count: 3,
                bonus_per_stack: StatBonus::new(1, 1, 0, 0.0, 0.0),
            },
        );
        state.cheat_bonus = StatBonus::new(100, 0, 0, 0.0, 0.0);
        state.checkin.bonus = StatBonus::new(10, 5, 50, 0.0, 0.0);
        state.rare_bonus = StatBonus::new(0, 0, 0, 1.0, 10.0);
        state.owned_skills.insert("skill_life_bloom".to_string(), 1);
        state.equipped_skills.push("skill_life_bloom".to_string());

        let stats = PlayerStats::calculate(&state);
        assert_eq!(stats.attack, 5 + 3 + 100 + 10);
        assert_eq!(stats.defense, 3 + 3 + 5);
        assert_eq!(stats.max_hp, 150 + 50 + 500);
        assert!((stats.crit_rate - 6.0).abs() < 1e-9);
        assert!((stats.crit_damage - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_active_skills_add_nothing() {
        let mut state = GameState::new(0);
        let before = PlayerStats::calculate(&state);
        state.owned_skills.insert("skill_fireball".to_string(), 1);
        state.equipped_skills.push("skill_fireball".to_string());
        assert_eq!(PlayerStats::calculate(&state), before);
    }
}
