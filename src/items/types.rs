use crate::character::bonus::StatBonus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    #[serde(rename = "武器")]
    Weapon,
    #[serde(rename = "头盔")]
    Helmet,
    #[serde(rename = "护甲")]
    Armor,
    #[serde(rename = "护腿")]
    Leggings,
    #[serde(rename = "靴子")]
    Boots,
    #[serde(rename = "饰品")]
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 6] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Helmet,
        EquipmentSlot::Armor,
        EquipmentSlot::Leggings,
        EquipmentSlot::Boots,
        EquipmentSlot::Accessory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "武器",
            EquipmentSlot::Helmet => "头盔",
            EquipmentSlot::Armor => "护甲",
            EquipmentSlot::Leggings => "护腿",
            EquipmentSlot::Boots => "靴子",
            EquipmentSlot::Accessory => "饰品",
        }
    }

    /// Looks a slot up by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }

    /// Base stats at item level 1 and quality multiplier 1.0.
    pub fn base_stats(&self) -> StatBonus {
        match self {
            EquipmentSlot::Weapon => StatBonus::new(15, 0, 0, 3.0, 20.0),
            EquipmentSlot::Helmet => StatBonus::new(3, 8, 50, 2.0, 10.0),
            EquipmentSlot::Armor => StatBonus::new(0, 20, 100, 0.0, 5.0),
            EquipmentSlot::Leggings => StatBonus::new(5, 10, 80, 1.0, 10.0),
            EquipmentSlot::Boots => StatBonus::new(5, 5, 60, 2.0, 15.0),
            EquipmentSlot::Accessory => StatBonus::new(8, 8, 40, 4.0, 25.0),
        }
    }

    /// Affix kinds that may roll on this slot.
    pub fn affix_pool(&self) -> &'static [AffixKind] {
        use AffixKind::*;
        match self {
            EquipmentSlot::Weapon => &[Attack, CritRate, CritDamage, Penetration, Lifesteal],
            EquipmentSlot::Helmet => &[Attack, Defense, Hp, CritRate, Accuracy],
            EquipmentSlot::Armor => &[Defense, Hp, DamageReduction, Block, Tenacity],
            EquipmentSlot::Leggings => &[Attack, Defense, Hp, Evasion, Speed],
            EquipmentSlot::Boots => &[Attack, Defense, Hp, Speed, Evasion],
            EquipmentSlot::Accessory => &[
                Attack,
                Defense,
                Hp,
                CritRate,
                CritDamage,
                Penetration,
                Lifesteal,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quality {
    Common = 0,
    Fine = 1,
    Superior = 2,
    Epic = 3,
    Legendary = 4,
    Mythic = 5,
}

impl Quality {
    pub const ALL: [Quality; 6] = [
        Quality::Common,
        Quality::Fine,
        Quality::Superior,
        Quality::Epic,
        Quality::Legendary,
        Quality::Mythic,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Tier for an ordinal; out-of-range values clamp to the top tier.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quality::Common => "普通",
            Quality::Fine => "优秀",
            Quality::Superior => "精良",
            Quality::Epic => "史诗",
            Quality::Legendary => "传说",
            Quality::Mythic => "神话",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Quality::Common => 1.0,
            Quality::Fine => 1.2,
            Quality::Superior => 1.5,
            Quality::Epic => 2.0,
            Quality::Legendary => 3.0,
            Quality::Mythic => 5.0,
        }
    }

    /// Inclusive `(min, max)` affix count.
    pub fn affix_range(&self) -> (usize, usize) {
        match self {
            Quality::Common => (0, 1),
            Quality::Fine => (1, 2),
            Quality::Superior => (2, 3),
            Quality::Epic => (3, 4),
            Quality::Legendary => (4, 5),
            Quality::Mythic => (5, 6),
        }
    }
}

/// Bonus affixes. Only the first five map onto combat stats; the rest are
/// collectible flavour carried on the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AffixKind {
    #[serde(rename = "攻击力")]
    Attack,
    #[serde(rename = "防御力")]
    Defense,
    #[serde(rename = "生命值")]
    Hp,
    #[serde(rename = "暴击率")]
    CritRate,
    #[serde(rename = "暴击伤害")]
    CritDamage,
    #[serde(rename = "穿透")]
    Penetration,
    #[serde(rename = "吸血")]
    Lifesteal,
    #[serde(rename = "减伤")]
    DamageReduction,
    #[serde(rename = "格挡")]
    Block,
    #[serde(rename = "韧性")]
    Tenacity,
    #[serde(rename = "命中率")]
    Accuracy,
    #[serde(rename = "闪避")]
    Evasion,
    #[serde(rename = "速度")]
    Speed,
}

impl AffixKind {
    pub fn name(&self) -> &'static str {
        match self {
            AffixKind::Attack => "攻击力",
            AffixKind::Defense => "防御力",
            AffixKind::Hp => "生命值",
            AffixKind::CritRate => "暴击率",
            AffixKind::CritDamage => "暴击伤害",
            AffixKind::Penetration => "穿透",
            AffixKind::Lifesteal => "吸血",
            AffixKind::DamageReduction => "减伤",
            AffixKind::Block => "格挡",
            AffixKind::Tenacity => "韧性",
            AffixKind::Accuracy => "命中率",
            AffixKind::Evasion => "闪避",
            AffixKind::Speed => "速度",
        }
    }

    pub fn base_value(&self) -> f64 {
        match self {
            AffixKind::Attack => 5.0,
            AffixKind::Defense => 3.0,
            AffixKind::Hp => 20.0,
            AffixKind::CritRate => 1.0,
            AffixKind::CritDamage => 5.0,
            AffixKind::Penetration => 2.0,
            AffixKind::Lifesteal => 1.0,
            AffixKind::DamageReduction => 1.0,
            AffixKind::Block => 1.0,
            AffixKind::Tenacity => 1.0,
            AffixKind::Accuracy => 2.0,
            AffixKind::Evasion => 1.0,
            AffixKind::Speed => 2.0,
        }
    }

    /// Adds `value` to the matching combat stat. Returns false for affixes
    /// without a combat mapping.
    pub fn apply(&self, value: u32, bonus: &mut StatBonus) -> bool {
        match self {
            AffixKind::Attack => bonus.attack = bonus.attack.saturating_add(value),
            AffixKind::Defense => bonus.defense = bonus.defense.saturating_add(value),
            AffixKind::Hp => bonus.hp = bonus.hp.saturating_add(value),
            AffixKind::CritRate => bonus.crit_rate += value as f64,
            AffixKind::CritDamage => bonus.crit_damage += value as f64,
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub slot: EquipmentSlot,
    pub quality: Quality,
    /// Stage at which the item dropped.
    pub level: u32,
    pub name: String,
    pub base: StatBonus,
    #[serde(default)]
    pub affixes: BTreeMap<AffixKind, u32>,
}

impl Item {
    /// Combat stats this item grants, with the slot's enhancement applied.
    pub fn stat_contribution(&self, enhancement_multiplier: f64) -> StatBonus {
        let mut total = self.base;
        for (kind, value) in &self.affixes {
            kind.apply(*value, &mut total);
        }
        if (enhancement_multiplier - 1.0).abs() > f64::EPSILON {
            total = total.scaled(enhancement_multiplier);
        }
        total
    }
}
