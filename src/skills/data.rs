//! Skill catalog. Entries are never mutated; ownership lives in `GameState`.

use crate::character::bonus::StatBonus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillRarity {
    Rare,
    Epic,
    Legendary,
}

/// Always-on flat modifiers while equipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassiveEffect {
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
    /// Number of enemies each basic attack hits.
    pub multi_target: Option<usize>,
}

impl PassiveEffect {
    const NONE: PassiveEffect = PassiveEffect {
        attack: 0,
        defense: 0,
        hp: 0,
        crit_rate: 0.0,
        crit_damage: 0.0,
        multi_target: None,
    };

    pub fn bonus(&self) -> StatBonus {
        StatBonus::new(self.attack, self.defense, self.hp, self.crit_rate, self.crit_damage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    Single,
    Count(usize),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveEffect {
    Damage { multiplier: f64, target: TargetMode },
    /// Restores `percent` of max HP.
    Heal { percent: f64 },
    /// Primary target loses `skip_turns` counterattacks.
    Control { skip_turns: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillKind {
    Passive(PassiveEffect),
    Active { cooldown: u32, effect: ActiveEffect },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: &'static str,
    pub name: &'static str,
    pub rarity: SkillRarity,
    pub kind: SkillKind,
}

impl Skill {
    pub fn is_passive(&self) -> bool {
        matches!(self.kind, SkillKind::Passive(_))
    }
}

pub static SKILLS: [Skill; 11] = [
    Skill {
        id: "skill_power_surge",
        name: "力量激增",
        rarity: SkillRarity::Rare,
        kind: SkillKind::Passive(PassiveEffect {
            attack: 200,
            ..PassiveEffect::NONE
        }),
    },
    Skill {
        id: "skill_iron_wall",
        name: "钢铁壁垒",
        rarity: SkillRarity::Rare,
        kind: SkillKind::Passive(PassiveEffect {
            defense: 150,
            ..PassiveEffect::NONE
        }),
    },
    Skill {
        id: "skill_berserk",
        name: "狂战之心",
        rarity: SkillRarity::Epic,
        kind: SkillKind::Passive(PassiveEffect {
            crit_rate: 5.0,
            crit_damage: 30.0,
            ..PassiveEffect::NONE
        }),
    },
    Skill {
        id: "skill_life_bloom",
        name: "生命绽放",
        rarity: SkillRarity::Rare,
        kind: SkillKind::Passive(PassiveEffect {
            hp: 500,
            ..PassiveEffect::NONE
        }),
    },
    Skill {
        id: "skill_focus",
        name: "专注意志",
        rarity: SkillRarity::Epic,
        kind: SkillKind::Passive(PassiveEffect {
            attack: 100,
            defense: 100,
            ..PassiveEffect::NONE
        }),
    },
    Skill {
        id: "skill_multi_shot",
        name: "多重箭",
        rarity: SkillRarity::Epic,
        kind: SkillKind::Passive(PassiveEffect {
            multi_target: Some(3),
            ..PassiveEffect::NONE
        }),
    },
    Skill {
        id: "skill_flame_storm",
        name: "烈焰风暴",
        rarity: SkillRarity::Epic,
        kind: SkillKind::Active {
            cooldown: 3,
            effect: ActiveEffect::Damage {
                multiplier: 1.5,
                target: TargetMode::All,
            },
        },
    },
    Skill {
        id: "skill_fireball",
        name: "炎爆术",
        rarity: SkillRarity::Rare,
        kind: SkillKind::Active {
            cooldown: 2,
            effect: ActiveEffect::Damage {
                multiplier: 2.5,
                target: TargetMode::Single,
            },
        },
    },
    Skill {
        id: "skill_polymorph",
        name: "变羊术",
        rarity: SkillRarity::Legendary,
        kind: SkillKind::Active {
            cooldown: 4,
            effect: ActiveEffect::Control { skip_turns: 1 },
        },
    },
    Skill {
        id: "skill_chain_lightning",
        name: "连锁闪电",
        rarity: SkillRarity::Epic,
        kind: SkillKind::Active {
            cooldown: 2,
            effect: ActiveEffect::Damage {
                multiplier: 1.2,
                target: TargetMode::Count(3),
            },
        },
    },
    Skill {
        id: "skill_heal",
        name: "治疗术",
        rarity: SkillRarity::Rare,
        kind: SkillKind::Active {
            cooldown: 3,
            effect: ActiveEffect::Heal { percent: 0.5 },
        },
    },
];

pub fn get_skill(id: &str) -> Option<&'static Skill> {
    SKILLS.iter().find(|skill| skill.id == id)
}
