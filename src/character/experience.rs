//! Experience curve, kill rewards, and level-ups.

use crate::core::constants::*;
use crate::core::game_state::GameState;

/// Experience needed to clear `level`: 100 + (level - 1) * 50.
pub fn exp_for_level(level: u32) -> u64 {
    EXP_CURVE_BASE + level.saturating_sub(1) as u64 * EXP_CURVE_STEP
}

/// Experience for one kill (or the reference kill of a wave) at `stage`.
pub fn kill_exp(stage: u32, boss: bool) -> u64 {
    let per_stage = if boss { BOSS_EXP_PER_STAGE } else { KILL_EXP_PER_STAGE };
    (stage as u64 * per_stage).max(MIN_KILL_EXP)
}

/// Wave-completion multiplier keyed by wave size and boss flag.
pub fn wave_exp_multiplier(enemy_count: usize, is_boss: bool) -> f64 {
    if is_boss {
        return BOSS_WAVE_EXP_MULTIPLIER;
    }
    match enemy_count {
        0 | 1 => 1.0,
        2 => PAIR_WAVE_EXP_MULTIPLIER,
        _ => CROWD_WAVE_EXP_MULTIPLIER,
    }
}

/// Extra experience granted on clearing a wave: `floor(base * (multiplier - 1))`.
pub fn wave_bonus_exp(stage: u32, enemy_count: usize, is_boss: bool) -> u64 {
    let base = kill_exp(stage, is_boss) as f64;
    (base * (wave_exp_multiplier(enemy_count, is_boss) - 1.0)).floor() as u64
}

/// Adds experience, applying as many level-ups as it pays for.
///
/// Each level-up refreshes the threshold and refills HP to the new maximum.
/// Returns the new levels reached, in order.
pub fn grant_exp(state: &mut GameState, amount: u64) -> Vec<u32> {
    let mut levels = Vec::new();
    state.exp = state.exp.saturating_add(amount);

    while state.exp >= state.exp_to_next {
        state.exp -= state.exp_to_next;
        state.level += 1;
        state.exp_to_next = exp_for_level(state.level);
        state.heal_full();
        levels.push(state.level);
    }

    for level in &levels {
        state.add_log(format!("Level up! Now level {}", level));
    }
    if let Some(level) = levels.last() {
        tracing::debug!(level, "level up");
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_curve() {
        assert_eq!(exp_for_level(1), 100);
        assert_eq!(exp_for_level(2), 150);
        assert_eq!(exp_for_level(10), 550);
    }

    #[test]
    fn test_kill_exp_floor_and_boss() {
        assert_eq!(kill_exp(1, false), 20);
        assert_eq!(kill_exp(1, true), 60);
        assert_eq!(kill_exp(5, false), 100);
        assert_eq!(kill_exp(0, false), 10);
    }

    #[test]
    fn test_wave_multipliers() {
        assert!((wave_exp_multiplier(1, false) - 1.0).abs() < 1e-9);
        assert!((wave_exp_multiplier(2, false) - 1.2).abs() < 1e-9);
        assert!((wave_exp_multiplier(3, false) - 1.5).abs() < 1e-9);
        assert!((wave_exp_multiplier(3, true) - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_wave_bonus_exp() {
        assert_eq!(wave_bonus_exp(1, 1, false), 0);
        assert_eq!(wave_bonus_exp(1, 2, false), 4); // floor(20 * 0.2)
        assert_eq!(wave_bonus_exp(2, 3, false), 20);
        assert_eq!(wave_bonus_exp(1, 3, true), 48);
    }

    #[test]
    fn test_exact_threshold_levels_once() {
        let mut state = GameState::new(0);
        let threshold = state.exp_to_next;
        let levels = grant_exp(&mut state, threshold);
        assert_eq!(levels, vec![2]);
        assert_eq!(state.exp, 0);
        assert_eq!(state.exp_to_next, 150);
    }

    #[test]
    fn test_two_thresholds_level_twice() {
        let mut state = GameState::new(0);
        let levels = grant_exp(&mut state, exp_for_level(1) + exp_for_level(2));
        assert_eq!(levels, vec![2, 3]);
        assert_eq!(state.exp, 0);
    }

    #[test]
    fn test_level_up_refills_hp() {
        let mut state = GameState::new(0);
        state.player_hp = 1;
        grant_exp(&mut state, 100);
        assert_eq!(state.player_hp, state.max_hp());
        assert_eq!(state.player_hp, 200);
    }

    #[test]
    fn test_below_threshold_no_level() {
        let mut state = GameState::new(0);
        assert!(grant_exp(&mut state, 99).is_empty());
        assert_eq!(state.exp, 99);
        assert_eq!(state.level, 1);
    }
}
