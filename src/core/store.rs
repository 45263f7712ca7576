//! The single owner of the game state.
//!
//! Every user command and timer tick goes through [`GameStore::dispatch`],
//! which computes the next snapshot from a copy of the current one, swaps it
//! in, and persists it.

use super::commands::Command;
use super::config::GameConfig;
use super::game_state::GameState;
use super::offline::{claim_offline_rewards, reconcile_offline};
use super::timers::{
    auto_battle_tick, online_tick, rest_tick, start_auto_battle, start_rest, stop_auto_battle,
    SessionClock,
};
use crate::character::bonus::StatBonus;
use crate::character::checkin::check_in;
use crate::character::derived_stats::PlayerStats;
use crate::combat::logic::{attack, cast_skill, revive};
use crate::combat::types::CombatEvent;
use crate::core::constants::CHEAT_STAT_BONUS;
use crate::items::drops::{decompose_batch, decompose_item};
use crate::items::enhancement::strengthen_slot;
use crate::items::equipment::{equip_item, unequip_item};
use crate::persistence::SnapshotStore;
use crate::skills::logic::{equip_skill, unequip_skill};
use crate::stages::progression::{next_stage, select_stage, set_auto_advance, spawn_wave};
use chrono::{DateTime, Local, NaiveDate};
use rand::Rng;

pub struct GameStore<R: Rng, S: SnapshotStore> {
    state: GameState,
    config: GameConfig,
    clock: SessionClock,
    rng: R,
    storage: S,
}

impl<R: Rng, S: SnapshotStore> GameStore<R, S> {
    /// Loads the saved snapshot (or starts fresh) and reconciles time spent
    /// offline into a pending claim.
    ///
    /// A missing or unreadable snapshot is never fatal; the player simply
    /// starts over.
    pub fn open(config: GameConfig, storage: S, rng: R, now: DateTime<Local>) -> Self {
        let mut state = match storage.load() {
            Ok(Some(state)) => {
                tracing::info!(level = state.level, stage = state.current_stage, "snapshot loaded");
                state
            }
            Ok(None) => {
                tracing::info!("no snapshot found, starting a new character");
                GameState::new(now.timestamp())
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load snapshot, starting a new character");
                GameState::new(now.timestamp())
            }
        };
        reconcile_offline(&mut state, now.timestamp(), &config);

        let mut store = Self {
            clock: SessionClock::new(&config),
            state,
            config,
            rng,
            storage,
        };
        store.persist();
        store
    }

    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> PlayerStats {
        self.state.stats()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies one command and persists the result.
    pub fn dispatch(&mut self, command: Command, now: DateTime<Local>) -> Vec<CombatEvent> {
        if matches!(command, Command::ResetAll) {
            self.reset_all(now);
            return Vec::new();
        }
        if !command.is_tick() {
            tracing::debug!(?command, "dispatch");
        }

        let mut next = self.state.clone();
        let events = transition(
            &mut next,
            &command,
            &self.config,
            &mut self.clock,
            &mut self.rng,
            now.date_naive(),
        );
        next.last_seen = now.timestamp();
        self.state = next;
        self.persist();
        events
    }

    /// Runs the session clock forward and dispatches every tick that fell due.
    pub fn advance(&mut self, elapsed_ms: u64, now: DateTime<Local>) -> Vec<CombatEvent> {
        let due = self
            .clock
            .advance(elapsed_ms, self.state.auto_battle, self.state.resting);
        let mut events = Vec::new();
        for command in due {
            events.extend(self.dispatch(command, now));
        }
        events
    }

    /// Wipes the character and the saved snapshot.
    pub fn reset_all(&mut self, now: DateTime<Local>) {
        self.state = GameState::new(now.timestamp());
        self.clock = SessionClock::new(&self.config);
        if let Err(e) = self.storage.erase() {
            tracing::warn!(error = %e, "failed to erase saved snapshot");
        }
        self.state.add_log("Account reset");
        tracing::info!("account reset");
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.persist(&self.state) {
            tracing::warn!(error = %e, "failed to persist snapshot");
        }
    }
}

fn transition(
    state: &mut GameState,
    command: &Command,
    config: &GameConfig,
    clock: &mut SessionClock,
    rng: &mut impl Rng,
    today: NaiveDate,
) -> Vec<CombatEvent> {
    match command {
        Command::SpawnWave => spawn_wave(state, config, rng),
        Command::Attack => attack(state, config, rng),
        Command::CastSkill(id) => cast_skill(state, id, config, rng),
        Command::EquipItem(id) => {
            equip_item(state, *id);
            Vec::new()
        }
        Command::UnequipItem(slot) => {
            unequip_item(state, *slot, config);
            Vec::new()
        }
        Command::EquipSkill(id) => {
            equip_skill(state, id, config);
            Vec::new()
        }
        Command::UnequipSkill(id) => {
            unequip_skill(state, id);
            Vec::new()
        }
        Command::SelectStage(stage) => {
            if select_stage(state, *stage) {
                clock.cancel_auto_battle();
                vec![CombatEvent::StageChanged { stage: *stage }]
            } else {
                Vec::new()
            }
        }
        Command::NextStage => {
            if next_stage(state) {
                clock.cancel_auto_battle();
                vec![CombatEvent::StageChanged {
                    stage: state.current_stage,
                }]
            } else {
                Vec::new()
            }
        }
        Command::StartAutoBattle => {
            clock.cancel_auto_battle();
            start_auto_battle(state, config, rng)
        }
        Command::StopAutoBattle => {
            stop_auto_battle(state);
            clock.cancel_auto_battle();
            Vec::new()
        }
        Command::StartRest => {
            if start_rest(state) {
                clock.cancel_auto_battle();
                clock.cancel_rest();
            }
            Vec::new()
        }
        Command::Revive => revive(state, config, rng),
        Command::SetAutoDecompose(policy) => {
            state.auto_decompose = *policy;
            state.add_log(if policy.enabled {
                format!("Auto-decompose up to {}", policy.max_quality.name())
            } else {
                "Auto-decompose disabled".to_string()
            });
            Vec::new()
        }
        Command::DecomposeItem(id) => {
            decompose_item(state, *id);
            Vec::new()
        }
        Command::DecomposeBatch {
            max_quality,
            max_level,
        } => {
            decompose_batch(state, *max_quality, *max_level);
            Vec::new()
        }
        Command::StrengthenSlot(slot) => {
            strengthen_slot(state, *slot);
            Vec::new()
        }
        Command::CheckIn => perform_check_in(state, today),
        Command::ClaimOfflineRewards => claim_offline_rewards(state, config, rng),
        Command::SetAutoAdvance(enabled) => {
            set_auto_advance(state, *enabled);
            Vec::new()
        }
        Command::ActivateCheat => {
            activate_cheat(state);
            Vec::new()
        }
        // Handled by the store before a transition is computed.
        Command::ResetAll => Vec::new(),
        Command::AutoBattleTick => auto_battle_tick(state, config, rng),
        Command::RestTick => rest_tick(state, config),
        Command::OnlineTick => {
            online_tick(state, config);
            Vec::new()
        }
    }
}

fn perform_check_in(state: &mut GameState, today: NaiveDate) -> Vec<CombatEvent> {
    let Some(reward) = check_in(&mut state.checkin, today) else {
        state.add_log("Already checked in today");
        return Vec::new();
    };
    state.add_log(format!(
        "Day {} check-in: {}",
        reward.streak,
        reward.bonus.summary()
    ));
    if reward.extra_skill_slot {
        state.add_log("Unlocked an extra skill slot!");
    }
    tracing::info!(streak = reward.streak, total = state.checkin.total, "checked in");
    vec![CombatEvent::CheckedIn {
        streak: reward.streak,
    }]
}

/// One-shot easter egg.
fn activate_cheat(state: &mut GameState) -> bool {
    if state.cheat_used {
        return false;
    }
    state.cheat_used = true;
    state.cheat_bonus = StatBonus::new(CHEAT_STAT_BONUS, CHEAT_STAT_BONUS, 0, 0.0, 0.0);
    state.normalize_hp();
    state.add_log(format!(
        "Secret unlocked! +{} ATK +{} DEF",
        CHEAT_STAT_BONUS, CHEAT_STAT_BONUS
    ));
    true
}
