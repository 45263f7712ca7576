//! Daily check-in streaks and their cumulative rewards.

use super::bonus::StatBonus;
use crate::core::constants::*;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckInRecord {
    pub last_date: Option<NaiveDate>,
    pub streak: u32,
    pub total: u32,
    /// Sum of every reward ever granted; feeds the stat aggregator.
    pub bonus: StatBonus,
    pub extra_skill_slots: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInReward {
    pub streak: u32,
    pub bonus: StatBonus,
    pub extra_skill_slot: bool,
}

/// Reward for reaching `streak` consecutive days.
pub fn reward_for_streak(streak: u32) -> CheckInReward {
    let mut bonus = StatBonus::new(
        CHECKIN_DAILY_ATTACK,
        CHECKIN_DAILY_DEFENSE,
        CHECKIN_DAILY_HP,
        0.0,
        0.0,
    );
    if streak > 0 && streak % CHECKIN_WEEKLY_INTERVAL == 0 {
        bonus += StatBonus::new(
            CHECKIN_WEEKLY_ATTACK,
            CHECKIN_WEEKLY_DEFENSE,
            0,
            CHECKIN_WEEKLY_CRIT_RATE,
            CHECKIN_WEEKLY_CRIT_DAMAGE,
        );
    }
    CheckInReward {
        streak,
        bonus,
        extra_skill_slot: streak > 0 && streak % CHECKIN_MONTHLY_INTERVAL == 0,
    }
}

/// Streak value after checking in on `today`, or `None` if already checked in.
pub fn next_streak(record: &CheckInRecord, today: NaiveDate) -> Option<u32> {
    match record.last_date {
        None => Some(1),
        Some(last) => match (today - last).num_days() {
            0 => None,
            1 => Some(record.streak + 1),
            // Gaps and clock rollbacks both restart the streak.
            _ => Some(1),
        },
    }
}

/// Checks in for `today`, folding the reward into the record.
pub fn check_in(record: &mut CheckInRecord, today: NaiveDate) -> Option<CheckInReward> {
    let streak = next_streak(record, today)?;
    let reward = reward_for_streak(streak);

    record.last_date = Some(today);
    record.streak = streak;
    record.total += 1;
    record.bonus += reward.bonus;
    if reward.extra_skill_slot {
        record.extra_skill_slots += 1;
    }
    Some(reward)
}
