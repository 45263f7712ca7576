//! Integration test: offline reconciliation at startup and claiming.

use chrono::{DateTime, Local, TimeZone};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::core::OfflineReward;
use skirmish::{Command, CombatEvent, GameConfig, GameStore, MemoryStore};

const LAST_SEEN: i64 = 1_700_000_000;

fn at(ts: i64) -> DateTime<Local> {
    Local.timestamp_opt(ts, 0).unwrap()
}

fn reopen_after(seconds: i64, snapshot: &str) -> GameStore<ChaCha8Rng, MemoryStore> {
    GameStore::open(
        GameConfig::default(),
        MemoryStore::from_json(snapshot),
        ChaCha8Rng::seed_from_u64(31),
        at(LAST_SEEN + seconds),
    )
}

fn snapshot_at_stage(stage: u32) -> String {
    format!(
        r#"{{"last_seen": {}, "current_stage": {}, "max_stage_reached": {}}}"#,
        LAST_SEEN, stage, stage
    )
}

#[test]
fn test_long_absence_is_capped_at_a_day() {
    let store = reopen_after(2_000 * 60, &snapshot_at_stage(1));
    let reward = store.snapshot().pending_offline.clone().unwrap();
    assert_eq!(
        reward,
        OfflineReward {
            minutes: 1_440,
            kills: 1_440,
            exp: 1_440 * 20,
            equipment: 144,
            skills: 216,
            stage: 1,
        }
    );
    assert_eq!(store.snapshot().last_seen, LAST_SEEN + 2_000 * 60);
}

#[test]
fn test_short_absence_earns_nothing() {
    let store = reopen_after(60, &snapshot_at_stage(1));
    assert!(store.snapshot().pending_offline.is_none());
}

#[test]
fn test_exp_scales_with_stage() {
    let store = reopen_after(10 * 60 + 59, &snapshot_at_stage(4));
    let reward = store.snapshot().pending_offline.clone().unwrap();
    assert_eq!(reward.minutes, 10);
    assert_eq!(reward.exp, 10 * 80);
    assert_eq!(reward.equipment, 1);
    assert_eq!(reward.skills, 1);
}

#[test]
fn test_claim_applies_rewards_once() {
    let now = at(LAST_SEEN + 30 * 60);
    let mut store = reopen_after(30 * 60, &snapshot_at_stage(1));

    let events = store.dispatch(Command::ClaimOfflineRewards, now);
    assert!(events.contains(&CombatEvent::OfflineRewardsClaimed { kills: 30, exp: 600 }));
    let items = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                CombatEvent::ItemDropped { .. }
                    | CombatEvent::ItemDecomposed { .. }
                    | CombatEvent::ItemLost { .. }
            )
        })
        .count();
    assert_eq!(items, 3);
    let skills = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::SkillDropped { .. }))
        .count();
    assert_eq!(skills, 4);

    let state = store.snapshot();
    assert!(state.pending_offline.is_none());
    assert_eq!(state.inventory.len(), 3);
    assert_eq!(state.owned_skills.values().sum::<u32>(), 4);
    assert_eq!(state.bestiary.values().map(|entry| entry.count).sum::<u32>(), 30);
    // 600 exp: 100 to level 2, 150 to 3, 200 to 4, 150 left over.
    assert_eq!(state.level, 4);
    assert_eq!(state.exp, 150);

    let again = store.dispatch(Command::ClaimOfflineRewards, now);
    assert!(again.is_empty());
    assert_eq!(store.snapshot().level, 4);
}
