use super::bonus::StatBonus;
use crate::core::constants::BESTIARY_BONUS_RATIO;
use crate::stages::data::MonsterType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestiaryEntry {
    pub name: String,
    pub count: u32,
    /// Fixed at first kill.
    pub bonus_per_stack: StatBonus,
}

/// Per-stack bonus earned from a monster type: 10% of base attack/defense, minimum 1.
pub fn stack_bonus(monster: &MonsterType) -> StatBonus {
    let scaled = |base: u32| ((base as f64 * BESTIARY_BONUS_RATIO).floor() as u32).max(1);
    StatBonus {
        attack: scaled(monster.attack),
        defense: scaled(monster.defense),
        ..StatBonus::ZERO
    }
}

/// Records a kill. Returns true when this was the first kill of the type.
pub fn record_kill(bestiary: &mut BTreeMap<String, BestiaryEntry>, monster: &MonsterType) -> bool {
    match bestiary.get_mut(monster.id) {
        Some(entry) => {
            entry.count = entry.count.saturating_add(1);
            false
        }
        None => {
            bestiary.insert(
                monster.id.to_string(),
                BestiaryEntry {
                    name: monster.name.to_string(),
                    count: 1,
                    bonus_per_stack: stack_bonus(monster),
                },
            );
            true
        }
    }
}

pub fn bestiary_bonus(bestiary: &BTreeMap<String, BestiaryEntry>) -> StatBonus {
    let mut total = StatBonus::ZERO;
    for entry in bestiary.values() {
        total += entry.bonus_per_stack.times(entry.count);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::data::{get_monster, MONSTERS};

    #[test]
    fn test_stack_bonus_has_floor_of_one() {
        let goblin = get_monster("goblin").unwrap();
        let bonus = stack_bonus(goblin);
        assert_eq!(bonus.attack, 1); // floor(5 * 0.1) = 0 -> 1
        assert_eq!(bonus.defense, 1);

        let dragon = get_monster("dragon").unwrap();
        assert_eq!(stack_bonus(dragon).attack, 5);
        assert_eq!(stack_bonus(dragon).defense, 2);
    }

    #[test]
    fn test_first_kill_then_stacks() {
        let mut bestiary = BTreeMap::new();
        let orc = get_monster("orc").unwrap();
        assert!(record_kill(&mut bestiary, orc));
        assert!(!record_kill(&mut bestiary, orc));
        assert!(!record_kill(&mut bestiary, orc));
        let entry = &bestiary["orc"];
        assert_eq!(entry.count, 3);
        assert_eq!(entry.bonus_per_stack.attack, 1);
        assert_eq!(bestiary_bonus(&bestiary).attack, 3);
    }

    #[test]
    fn test_bonus_sums_across_types() {
        let mut bestiary = BTreeMap::new();
        for monster in MONSTERS.iter() {
            record_kill(&mut bestiary, monster);
        }
        let total = bestiary_bonus(&bestiary);
        let expected: u32 = MONSTERS.iter().map(|m| stack_bonus(m).attack).sum();
        assert_eq!(total.attack, expected);
    }
}
