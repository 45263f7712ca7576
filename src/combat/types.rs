use crate::items::types::Quality;
use crate::stages::data::{scaled_stats, MonsterType};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyRole {
    Regular,
    Rare,
    BossLeader,
    BossAdd,
}

/// A live monster inside a wave. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: Uuid,
    pub monster: &'static MonsterType,
    pub role: EnemyRole,
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
    /// Counterattacks still to be skipped (control skills).
    pub skip_turns: u32,
    /// Counterattacks made so far, for periodic innate skills.
    pub counters: u32,
    pub reborn: bool,
}

impl Enemy {
    pub fn new(id: Uuid, monster: &'static MonsterType, stage: u32, role: EnemyRole) -> Self {
        let (hp, attack, defense) = scaled_stats(monster, stage);
        Self {
            id,
            monster,
            role,
            max_hp: hp,
            hp,
            attack,
            defense,
            crit_rate: monster.crit_rate,
            crit_damage: monster.crit_damage,
            skip_turns: 0,
            counters: 0,
            reborn: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.monster.name
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn is_boss_leader(&self) -> bool {
        self.role == EnemyRole::BossLeader
    }
}

/// The enemies currently being fought.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub enemies: Vec<Enemy>,
    /// Size at spawn; drives the completion bonus.
    pub initial_count: usize,
    pub is_boss: bool,
}

impl Wave {
    pub fn new(enemies: Vec<Enemy>, is_boss: bool) -> Self {
        Self {
            initial_count: enemies.len(),
            enemies,
            is_boss,
        }
    }

    pub fn has_alive(&self) -> bool {
        self.enemies.iter().any(Enemy::is_alive)
    }

    /// Ids of the first `count` living enemies, in wave order.
    pub fn front_targets(&self, count: usize) -> Vec<Uuid> {
        self.enemies
            .iter()
            .filter(|e| e.is_alive())
            .take(count)
            .map(|e| e.id)
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Enemy> {
        let pos = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(pos))
    }
}

/// Something that happened while applying a command, for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    WaveSpawned {
        enemies: usize,
        is_boss: bool,
    },
    PlayerAttack {
        target: Uuid,
        damage: u32,
        was_crit: bool,
    },
    EnemyAttack {
        attacker: Uuid,
        damage: u32,
        was_crit: bool,
    },
    EnemyStunned {
        enemy: Uuid,
    },
    EnemyGuarded {
        enemy: Uuid,
    },
    EnemyReborn {
        enemy: Uuid,
    },
    SkillCast {
        skill: &'static str,
    },
    PlayerHealed {
        amount: u32,
    },
    EnemyDied {
        enemy: Uuid,
        exp_gained: u64,
    },
    ItemDropped {
        name: String,
        quality: Quality,
    },
    ItemDecomposed {
        name: String,
        stones: u64,
    },
    ItemLost {
        name: String,
    },
    SkillDropped {
        skill: &'static str,
    },
    RareBonusGranted {
        monster: &'static str,
    },
    LevelUp {
        level: u32,
    },
    WaveCleared {
        bonus_exp: u64,
    },
    BossDefeated {
        advanced_to: Option<u32>,
    },
    PlayerDied {
        can_revive: bool,
    },
    Revived,
    RestFinished,
    StageChanged {
        stage: u32,
    },
    CheckedIn {
        streak: u32,
    },
    OfflineRewardsClaimed {
        kills: u64,
        exp: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::data::get_monster;

    fn enemy(id: u128) -> Enemy {
        Enemy::new(Uuid::from_u128(id), get_monster("goblin").unwrap(), 1, EnemyRole::Regular)
    }

    #[test]
    fn test_enemy_creation() {
        let e = enemy(1);
        assert_eq!(e.name(), "哥布林");
        assert_eq!(e.max_hp, 50);
        assert_eq!(e.hp, 50);
        assert_eq!(e.attack, 5);
        assert!(e.is_alive());
        assert!(!e.is_boss_leader());
    }

    #[test]
    fn test_enemy_take_damage_no_underflow() {
        let mut e = enemy(1);
        e.take_damage(20);
        assert_eq!(e.hp, 30);
        e.take_damage(100);
        assert_eq!(e.hp, 0);
        assert!(!e.is_alive());
    }

    #[test]
    fn test_enemy_heal_capped() {
        let mut e = enemy(1);
        e.take_damage(10);
        e.heal(100);
        assert_eq!(e.hp, e.max_hp);
    }

    #[test]
    fn test_front_targets_skip_dead() {
        let mut a = enemy(1);
        a.hp = 0;
        let wave = Wave::new(vec![a, enemy(2), enemy(3), enemy(4)], false);
        assert_eq!(wave.initial_count, 4);
        assert_eq!(
            wave.front_targets(2),
            vec![Uuid::from_u128(2), Uuid::from_u128(3)]
        );
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut wave = Wave::new(vec![enemy(1), enemy(2), enemy(3)], false);
        assert!(wave.remove(Uuid::from_u128(2)).is_some());
        assert!(wave.remove(Uuid::from_u128(2)).is_none());
        let ids: Vec<_> = wave.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
        assert_eq!(wave.initial_count, 3);
    }
}
