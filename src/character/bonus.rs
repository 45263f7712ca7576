use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Flat additive combat stats.
///
/// Every bonus source (equipment, bestiary, check-in, rare kills, passive
/// skills, cheat) is expressed as one of these and summed by the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
}

impl StatBonus {
    pub const ZERO: StatBonus = StatBonus {
        attack: 0,
        defense: 0,
        hp: 0,
        crit_rate: 0.0,
        crit_damage: 0.0,
    };

    pub const fn new(attack: u32, defense: u32, hp: u32, crit_rate: f64, crit_damage: f64) -> Self {
        Self {
            attack,
            defense,
            hp,
            crit_rate,
            crit_damage,
        }
    }

    pub fn add(&mut self, other: &StatBonus) {
        self.attack = self.attack.saturating_add(other.attack);
        self.defense = self.defense.saturating_add(other.defense);
        self.hp = self.hp.saturating_add(other.hp);
        self.crit_rate += other.crit_rate;
        self.crit_damage += other.crit_damage;
    }

    /// Multiplies every field by `count` (used for stacked bestiary bonuses).
    pub fn times(&self, count: u32) -> Self {
        Self {
            attack: self.attack.saturating_mul(count),
            defense: self.defense.saturating_mul(count),
            hp: self.hp.saturating_mul(count),
            crit_rate: self.crit_rate * count as f64,
            crit_damage: self.crit_damage * count as f64,
        }
    }

    /// Scales every field by `factor`, flooring each result.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            attack: (self.attack as f64 * factor).floor() as u32,
            defense: (self.defense as f64 * factor).floor() as u32,
            hp: (self.hp as f64 * factor).floor() as u32,
            crit_rate: (self.crit_rate * factor).floor(),
            crit_damage: (self.crit_damage * factor).floor(),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Short human readable summary, e.g. "+20 ATK +10 DEF".
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.attack > 0 {
            parts.push(format!("+{} ATK", self.attack));
        }
        if self.defense > 0 {
            parts.push(format!("+{} DEF", self.defense));
        }
        if self.hp > 0 {
            parts.push(format!("+{} HP", self.hp));
        }
        if self.crit_rate > 0.0 {
            parts.push(format!("+{}% CRIT", self.crit_rate));
        }
        if self.crit_damage > 0.0 {
            parts.push(format!("+{}% CDMG", self.crit_damage));
        }
        parts.join(" ")
    }
}

impl AddAssign for StatBonus {
    fn add_assign(&mut self, rhs: Self) {
        self.add(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_all_fields() {
        let mut total = StatBonus::new(10, 5, 50, 1.0, 5.0);
        total += StatBonus::new(1, 2, 3, 0.5, 2.0);
        assert_eq!(total.attack, 11);
        assert_eq!(total.defense, 7);
        assert_eq!(total.hp, 53);
        assert!((total.crit_rate - 1.5).abs() < f64::EPSILON);
        assert!((total.crit_damage - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_saturates() {
        let mut total = StatBonus::new(u32::MAX, 0, 0, 0.0, 0.0);
        total += StatBonus::new(5, 0, 0, 0.0, 0.0);
        assert_eq!(total.attack, u32::MAX);
    }

    #[test]
    fn test_scaled_floors() {
        let scaled = StatBonus::new(15, 3, 50, 3.0, 20.0).scaled(1.05);
        assert_eq!(scaled.attack, 15);
        assert_eq!(scaled.hp, 52);
        assert!((scaled.crit_damage - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_times_stacks() {
        let stacked = StatBonus::new(2, 1, 0, 0.0, 0.0).times(4);
        assert_eq!(stacked.attack, 8);
        assert_eq!(stacked.defense, 4);
    }

    #[test]
    fn test_summary_skips_zero_fields() {
        assert_eq!(StatBonus::new(20, 10, 0, 0.0, 0.0).summary(), "+20 ATK +10 DEF");
        assert!(StatBonus::ZERO.summary().is_empty());
    }
}
