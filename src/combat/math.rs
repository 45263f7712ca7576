//! Pure damage formulas shared by attacks, counters, and skills.

use rand::Rng;

/// Bernoulli trial with probability `rate_percent / 100`.
pub fn roll_crit(rate_percent: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() * 100.0 < rate_percent
}

fn crit_factor(was_crit: bool, crit_damage_percent: f64) -> f64 {
    if was_crit {
        crit_damage_percent / 100.0
    } else {
        1.0
    }
}

/// Player basic attack: `max(1, floor(max(1, atk - def) * crit))`.
pub fn player_hit_damage(attack: u32, defense: u32, was_crit: bool, crit_damage: f64) -> u32 {
    let raw = attack.saturating_sub(defense).max(1) as f64;
    ((raw * crit_factor(was_crit, crit_damage)).floor() as u32).max(1)
}

/// Monster counterattack; `innate_multiplier` applies before the crit.
pub fn monster_hit_damage(
    attack: u32,
    player_defense: u32,
    innate_multiplier: f64,
    was_crit: bool,
    crit_damage: f64,
) -> u32 {
    let raw = attack.saturating_sub(player_defense).max(1) as f64;
    ((raw * innate_multiplier * crit_factor(was_crit, crit_damage)).floor() as u32).max(1)
}

/// Active skill damage: `max(1, floor(atk * mult) - def)`.
pub fn skill_damage(attack: u32, multiplier: f64, defense: u32) -> u32 {
    let scaled = (attack as f64 * multiplier).floor() as u32;
    scaled.saturating_sub(defense).max(1)
}

/// Healing for `percent` of `max_hp`, floored.
pub fn heal_amount(max_hp: u32, percent: f64) -> u32 {
    (max_hp as f64 * percent).floor() as u32
}
