//! Monster, boss, and rare monster catalogs.

use crate::character::bonus::StatBonus;
use crate::core::constants::{MONSTER_BASE_CRIT_DAMAGE, MONSTER_BASE_CRIT_RATE, STAGE_STAT_STEP};

/// Signature ability a monster type carries into every fight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InnateSkill {
    /// Chance to hit for `multiplier`, healing for `lifesteal` of the damage dealt.
    Strike {
        chance: f64,
        multiplier: f64,
        lifesteal: f64,
    },
    /// Hits for `multiplier` while below `hp_ratio` of max HP.
    Enrage { hp_ratio: f64, multiplier: f64 },
    /// Every `every`-th counterattack hits for `multiplier`.
    Periodic { every: u32, multiplier: f64 },
    /// Chance to cut an incoming player hit by `reduction`.
    Guard { chance: f64, reduction: f64 },
    /// Once per instance, chance to return at `hp_ratio` of max HP instead of dying.
    Rebirth { chance: f64, hp_ratio: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonsterType {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub innate: Option<InnateSkill>,
    /// Permanent bonus granted on kill (rare types only).
    pub rare_reward: Option<StatBonus>,
}

impl MonsterType {
    const fn regular(
        id: &'static str,
        name: &'static str,
        (hp, attack, defense): (u32, u32, u32),
        (crit_rate, crit_damage): (f64, f64),
        innate: InnateSkill,
    ) -> Self {
        Self {
            id,
            name,
            hp,
            attack,
            defense,
            crit_rate,
            crit_damage,
            innate: Some(innate),
            rare_reward: None,
        }
    }

    const fn boss(id: &'static str, name: &'static str, hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            id,
            name,
            hp,
            attack,
            defense,
            crit_rate: MONSTER_BASE_CRIT_RATE,
            crit_damage: MONSTER_BASE_CRIT_DAMAGE,
            innate: None,
            rare_reward: None,
        }
    }

    const fn rare(
        id: &'static str,
        name: &'static str,
        (hp, attack, defense): (u32, u32, u32),
        reward: StatBonus,
    ) -> Self {
        Self {
            id,
            name,
            hp,
            attack,
            defense,
            crit_rate: MONSTER_BASE_CRIT_RATE,
            crit_damage: MONSTER_BASE_CRIT_DAMAGE,
            innate: None,
            rare_reward: Some(reward),
        }
    }

    pub fn is_rare(&self) -> bool {
        self.rare_reward.is_some()
    }
}

pub static MONSTERS: [MonsterType; 8] = [
    MonsterType::regular(
        "goblin",
        "哥布林",
        (50, 5, 2),
        (5.0, 150.0),
        InnateSkill::Strike {
            chance: 0.3,
            multiplier: 1.5,
            lifesteal: 0.0,
        },
    ),
    MonsterType::regular(
        "orc",
        "兽人",
        (120, 12, 5),
        (6.0, 160.0),
        InnateSkill::Enrage {
            hp_ratio: 0.5,
            multiplier: 1.5,
        },
    ),
    MonsterType::regular(
        "skeleton",
        "骷髅",
        (80, 8, 3),
        (7.0, 155.0),
        InnateSkill::Guard {
            chance: 0.2,
            reduction: 0.5,
        },
    ),
    MonsterType::regular(
        "dragon",
        "巨龙",
        (500, 50, 20),
        (8.0, 170.0),
        InnateSkill::Periodic {
            every: 3,
            multiplier: 2.0,
        },
    ),
    MonsterType::regular(
        "demon",
        "恶魔",
        (300, 35, 15),
        (9.0, 165.0),
        InnateSkill::Strike {
            chance: 0.25,
            multiplier: 2.0,
            lifesteal: 0.5,
        },
    ),
    MonsterType::regular(
        "titan",
        "泰坦",
        (1000, 100, 40),
        (10.0, 180.0),
        InnateSkill::Periodic {
            every: 4,
            multiplier: 1.5,
        },
    ),
    MonsterType::regular(
        "phoenix",
        "凤凰",
        (800, 80, 30),
        (11.0, 185.0),
        InnateSkill::Rebirth {
            chance: 0.5,
            hp_ratio: 0.5,
        },
    ),
    MonsterType::regular(
        "god",
        "神祇",
        (2000, 200, 80),
        (12.0, 200.0),
        InnateSkill::Periodic {
            every: 5,
            multiplier: 3.0,
        },
    ),
];

pub static BOSSES: [MonsterType; 8] = [
    MonsterType::boss("boss_1", "哥布林王", 500, 50, 20),
    MonsterType::boss("boss_2", "兽人酋长", 1200, 120, 50),
    MonsterType::boss("boss_3", "骷髅领主", 800, 80, 30),
    MonsterType::boss("boss_4", "远古巨龙", 5000, 500, 200),
    MonsterType::boss("boss_5", "地狱魔王", 3000, 350, 150),
    MonsterType::boss("boss_6", "泰坦之王", 10000, 1000, 400),
    MonsterType::boss("boss_7", "不死凤凰", 8000, 800, 300),
    MonsterType::boss("boss_8", "创世神", 20000, 2000, 800),
];

pub static RARE_MONSTERS: [MonsterType; 3] = [
    MonsterType::rare(
        "golden_goblin",
        "黄金哥布林",
        (150, 8, 4),
        StatBonus::new(20, 10, 0, 0.0, 0.0),
    ),
    MonsterType::rare(
        "crystal_slime",
        "水晶史莱姆",
        (200, 6, 10),
        StatBonus::new(0, 15, 200, 0.0, 0.0),
    ),
    MonsterType::rare(
        "shadow_wisp",
        "暗影幽灵",
        (120, 20, 5),
        StatBonus::new(0, 0, 0, 1.0, 10.0),
    ),
];

/// Looks a monster type up across every catalog.
pub fn get_monster(id: &str) -> Option<&'static MonsterType> {
    MONSTERS
        .iter()
        .chain(BOSSES.iter())
        .chain(RARE_MONSTERS.iter())
        .find(|monster| monster.id == id)
}

/// Boss guarding `stage`; stages past the last boss reuse it.
pub fn boss_for_stage(stage: u32) -> &'static MonsterType {
    let index = (stage.saturating_sub(1) as usize).min(BOSSES.len() - 1);
    &BOSSES[index]
}

/// Stat multiplier for a stage: +50% per stage after the first.
pub fn stage_multiplier(stage: u32) -> f64 {
    1.0 + stage.saturating_sub(1) as f64 * STAGE_STAT_STEP
}

/// Stage-scaled `(hp, attack, defense)`, floored.
pub fn scaled_stats(monster: &MonsterType, stage: u32) -> (u32, u32, u32) {
    let m = stage_multiplier(stage);
    let scale = |base: u32| (base as f64 * m).floor() as u32;
    (scale(monster.hp).max(1), scale(monster.attack), scale(monster.defense))
}
