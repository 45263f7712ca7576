// Player baseline
pub const BASE_PLAYER_HP: u32 = 100;
pub const BASE_CRIT_RATE: f64 = 5.0;
pub const BASE_CRIT_DAMAGE: f64 = 150.0;
pub const ATTACK_PER_LEVEL: u32 = 5;
pub const DEFENSE_PER_LEVEL: u32 = 3;
pub const HP_PER_LEVEL: u32 = 50;
pub const CRIT_RATE_PER_LEVEL: f64 = 0.2;
pub const MAX_LEVEL_CRIT_RATE_BONUS: f64 = 50.0;
pub const CRIT_DAMAGE_PER_LEVEL: f64 = 2.0;

// Experience curve: 100 + (level - 1) * 50
pub const EXP_CURVE_BASE: u64 = 100;
pub const EXP_CURVE_STEP: u64 = 50;
pub const MIN_KILL_EXP: u64 = 10;
pub const KILL_EXP_PER_STAGE: u64 = 20;
pub const BOSS_EXP_PER_STAGE: u64 = 60;

// Waves and stages
pub const MIN_WAVE_SIZE: usize = 1;
pub const MAX_WAVE_SIZE: usize = 3;
pub const BOSS_WAVE_EXP_MULTIPLIER: f64 = 1.8;
pub const PAIR_WAVE_EXP_MULTIPLIER: f64 = 1.2;
pub const CROWD_WAVE_EXP_MULTIPLIER: f64 = 1.5;
pub const STAGE_STAT_STEP: f64 = 0.5;
pub const RARE_MONSTER_CHANCE: f64 = 0.02;
pub const PAIR_WAVE_EQUIPMENT_CHANCE: f64 = 0.3;
pub const CROWD_WAVE_EQUIPMENT_CHANCE: f64 = 0.5;
pub const CROWD_WAVE_SKILL_CHANCE: f64 = 0.3;

// Monster defaults
pub const MONSTER_BASE_CRIT_RATE: f64 = 5.0;
pub const MONSTER_BASE_CRIT_DAMAGE: f64 = 150.0;

// Loot
pub const SKILL_DROP_RATE: f64 = 0.15;
pub const BOSS_LEADER_DROP_RATE: f64 = 0.8;
pub const BOSS_QUALITY_FLOOR: usize = 3;
pub const RARE_QUALITY_FLOOR: usize = 2;
pub const ITEM_LEVEL_SCALING_STEP: f64 = 0.1;
pub const AFFIX_ROLL_MIN: f64 = 0.8;
pub const AFFIX_ROLL_MAX: f64 = 1.2;
pub const BESTIARY_BONUS_RATIO: f64 = 0.1;

// Slot enhancement
pub const ENHANCEMENT_PERCENT_PER_LEVEL: f64 = 5.0;
pub const ENHANCEMENT_COST_PER_LEVEL: u32 = 5;

// Daily check-in
pub const CHECKIN_DAILY_ATTACK: u32 = 10;
pub const CHECKIN_DAILY_DEFENSE: u32 = 5;
pub const CHECKIN_DAILY_HP: u32 = 50;
pub const CHECKIN_WEEKLY_INTERVAL: u32 = 7;
pub const CHECKIN_WEEKLY_CRIT_RATE: f64 = 1.0;
pub const CHECKIN_WEEKLY_CRIT_DAMAGE: f64 = 5.0;
pub const CHECKIN_WEEKLY_ATTACK: u32 = 50;
pub const CHECKIN_WEEKLY_DEFENSE: u32 = 30;
pub const CHECKIN_MONTHLY_INTERVAL: u32 = 30;

// Skills
pub const BASE_SKILL_SLOTS: usize = 3;

// Session timing
pub const AUTO_BATTLE_INTERVAL_MS: u64 = 1000;
pub const REST_TICK_INTERVAL_MS: u64 = 100;
pub const ONLINE_TICK_INTERVAL_MS: u64 = 1000;
pub const REST_DURATION: f64 = 5.0;
pub const REST_PROGRESS_PER_TICK: f64 = 0.1;
pub const REVIVE_ONLINE_SECONDS: u64 = 30 * 60;

// Offline rewards
pub const MIN_OFFLINE_SECONDS: i64 = 60;
pub const MAX_OFFLINE_MINUTES: u64 = 24 * 60;
pub const OFFLINE_KILLS_PER_MINUTE: u64 = 1;
/// Equipment and skill yield per offline kill, in percent.
pub const OFFLINE_EQUIPMENT_PERCENT: u64 = 10;
pub const OFFLINE_SKILL_PERCENT: u64 = 15;

// Inventory
pub const INVENTORY_CAPACITY: usize = 100;
pub const EQUIPMENT_DROP_RATE: f64 = 1.0;

// Boss cadence
pub const BOSS_MINION_COUNT: usize = 2;
pub const MONSTERS_PER_BOSS: u32 = 10;

pub const CHEAT_STAT_BONUS: u32 = 5000;
pub const COMBAT_LOG_CAPACITY: usize = 10;

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x534B_524D_0000_0001; // "SKRM" v1
