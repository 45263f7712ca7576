//! Session timers: auto-battle, rest, and online-time ticking.
//!
//! `SessionClock` only measures time. It turns elapsed milliseconds into
//! tick commands that go through the same dispatch path as user input; the
//! handlers below decide what a tick actually does.

use super::commands::Command;
use super::config::GameConfig;
use super::game_state::GameState;
use crate::combat::logic::attack;
use crate::combat::types::CombatEvent;
use crate::stages::progression::spawn_wave;
use rand::Rng;

/// Rest progress is accumulated in float steps; this absorbs the drift.
const REST_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct SessionClock {
    auto_battle_interval: u64,
    rest_interval: u64,
    online_interval: u64,
    auto_battle_elapsed: u64,
    rest_elapsed: u64,
    online_elapsed: u64,
}

impl SessionClock {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            auto_battle_interval: config.auto_battle_interval_ms.max(1),
            rest_interval: config.rest_tick_interval_ms.max(1),
            online_interval: config.online_tick_interval_ms.max(1),
            auto_battle_elapsed: 0,
            rest_elapsed: 0,
            online_elapsed: 0,
        }
    }

    /// Advances the clock and returns every tick that fell due, in due order.
    ///
    /// A disabled timer does not accumulate time, so re-enabling it waits a
    /// full interval before the first tick.
    pub fn advance(&mut self, elapsed_ms: u64, auto_battle: bool, resting: bool) -> Vec<Command> {
        let mut due = Vec::new();

        if resting {
            drain(&mut self.rest_elapsed, self.rest_interval, elapsed_ms, Command::RestTick, &mut due);
        } else {
            self.rest_elapsed = 0;
        }
        if auto_battle && !resting {
            drain(
                &mut self.auto_battle_elapsed,
                self.auto_battle_interval,
                elapsed_ms,
                Command::AutoBattleTick,
                &mut due,
            );
        } else {
            self.auto_battle_elapsed = 0;
        }
        drain(&mut self.online_elapsed, self.online_interval, elapsed_ms, Command::OnlineTick, &mut due);

        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, command)| command).collect()
    }

    /// Drops any partially elapsed auto-battle interval.
    pub fn cancel_auto_battle(&mut self) {
        self.auto_battle_elapsed = 0;
    }

    pub fn cancel_rest(&mut self) {
        self.rest_elapsed = 0;
    }
}

fn drain(
    accumulated: &mut u64,
    interval: u64,
    elapsed: u64,
    command: Command,
    out: &mut Vec<(u64, Command)>,
) {
    let mut next = interval.saturating_sub(*accumulated);
    while next <= elapsed {
        out.push((next, command.clone()));
        next += interval;
    }
    *accumulated = interval - (next - elapsed);
}

/// Auto-battle tick: spawn when there is nothing to fight, otherwise one
/// exchange. Switches auto-battle off once the player is down.
pub fn auto_battle_tick(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<CombatEvent> {
    if !state.auto_battle || state.resting {
        return Vec::new();
    }
    if !state.is_alive() {
        state.auto_battle = false;
        return Vec::new();
    }
    if state.has_live_wave() {
        attack(state, config, rng)
    } else {
        spawn_wave(state, config, rng)
    }
}

/// Rest tick: advances recovery and heals to full once it completes.
pub fn rest_tick(state: &mut GameState, config: &GameConfig) -> Vec<CombatEvent> {
    if !state.resting {
        return Vec::new();
    }
    state.rest_progress += config.rest_progress_per_tick;
    if state.rest_progress + REST_EPSILON < config.rest_duration {
        return Vec::new();
    }
    state.resting = false;
    state.rest_progress = 0.0;
    state.heal_full();
    state.add_log("Fully rested");
    tracing::debug!("rest finished");
    vec![CombatEvent::RestFinished]
}

/// Online tick: one second of play time; enough of it earns a revive.
pub fn online_tick(state: &mut GameState, config: &GameConfig) {
    state.online_seconds = state.online_seconds.saturating_add(1);
    if !state.can_revive && state.online_seconds >= config.revive_online_seconds {
        state.can_revive = true;
        state.add_log("A revive is now available");
        tracing::info!(online_seconds = state.online_seconds, "revive earned");
    }
}

/// Turns auto-battle on and engages right away. No-op while down or resting.
pub fn start_auto_battle(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<CombatEvent> {
    if !state.is_alive() || state.resting || state.auto_battle {
        return Vec::new();
    }
    state.auto_battle = true;
    state.add_log("Auto-battle started");
    spawn_wave(state, config, rng)
}

pub fn stop_auto_battle(state: &mut GameState) -> bool {
    if !state.auto_battle {
        return false;
    }
    state.auto_battle = false;
    state.add_log("Auto-battle stopped");
    true
}

/// Leaves combat to recover. The current wave is abandoned.
pub fn start_rest(state: &mut GameState) -> bool {
    if state.resting {
        return false;
    }
    state.resting = true;
    state.rest_progress = 0.0;
    state.auto_battle = false;
    state.wave = None;
    state.add_log("Resting...");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn count(commands: &[Command], wanted: &Command) -> usize {
        commands.iter().filter(|c| *c == wanted).count()
    }

    #[test]
    fn test_clock_online_always_runs() {
        let mut clock = SessionClock::new(&GameConfig::default());
        let due = clock.advance(2_500, false, false);
        assert_eq!(due, vec![Command::OnlineTick, Command::OnlineTick]);
        let due = clock.advance(500, false, false);
        assert_eq!(due, vec![Command::OnlineTick]);
    }

    #[test]
    fn test_clock_rest_ticks_every_100ms() {
        let mut clock = SessionClock::new(&GameConfig::default());
        let due = clock.advance(1_000, true, true);
        assert_eq!(count(&due, &Command::RestTick), 10);
        assert_eq!(count(&due, &Command::AutoBattleTick), 0);
        assert_eq!(due.last(), Some(&Command::OnlineTick));
    }

    #[test]
    fn test_clock_orders_by_due_time() {
        let mut clock = SessionClock::new(&GameConfig::default());
        let due = clock.advance(1_999, true, false);
        assert_eq!(due, vec![Command::AutoBattleTick, Command::OnlineTick]);
        let due = clock.advance(1, true, false);
        assert_eq!(due, vec![Command::AutoBattleTick, Command::OnlineTick]);
    }

    #[test]
    fn test_clock_disabled_timer_resets() {
        let mut clock = SessionClock::new(&GameConfig::default());
        assert!(clock.advance(900, true, false).is_empty());
        clock.advance(50, false, false);
        assert_eq!(count(&clock.advance(900, true, false), &Command::AutoBattleTick), 0);
        clock.cancel_auto_battle();
        assert_eq!(count(&clock.advance(999, true, false), &Command::AutoBattleTick), 0);
        assert_eq!(count(&clock.advance(1, true, false), &Command::AutoBattleTick), 1);
    }

    #[test]
    fn test_rest_completes_after_fifty_ticks() {
        let config = GameConfig::default();
        let mut state = GameState::new(0);
        state.player_hp = 1;
        start_rest(&mut state);
        for _ in 0..49 {
            assert!(rest_tick(&mut state, &config).is_empty());
        }
        assert!(state.resting);
        assert_eq!(rest_tick(&mut state, &config), vec![CombatEvent::RestFinished]);
        assert!(!state.resting);
        assert_eq!(state.player_hp, state.max_hp());
        assert!(!state.auto_battle);
    }

    #[test]
    fn test_online_tick_sets_sticky_revive() {
        let config = GameConfig::default();
        let mut state = GameState::new(0);
        state.online_seconds = 1_798;
        online_tick(&mut state, &config);
        assert!(!state.can_revive);
        online_tick(&mut state, &config);
        assert!(state.can_revive);
        online_tick(&mut state, &config);
        assert!(state.can_revive);
    }

    #[test]
    fn test_auto_battle_tick_spawns_then_attacks() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = GameConfig::default();
        let mut state = GameState::new(0);
        assert!(auto_battle_tick(&mut state, &config, &mut rng).is_empty());

        state.auto_battle = true;
        let events = auto_battle_tick(&mut state, &config, &mut rng);
        assert!(matches!(events.first(), Some(CombatEvent::WaveSpawned { .. })));
        let events = auto_battle_tick(&mut state, &config, &mut rng);
        assert!(events.iter().any(|e| matches!(e, CombatEvent::PlayerAttack { .. })));
    }

    #[test]
    fn test_auto_battle_stops_when_down() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = GameState::new(0);
        state.auto_battle = true;
        state.player_hp = 0;
        auto_battle_tick(&mut state, &GameConfig::default(), &mut rng);
        assert!(!state.auto_battle);
    }

    #[test]
    fn test_start_rest_cancels_fight() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = GameConfig::default();
        let mut state = GameState::new(0);
        start_auto_battle(&mut state, &config, &mut rng);
        assert!(state.wave.is_some());
        assert!(start_rest(&mut state));
        assert!(!state.auto_battle);
        assert!(state.wave.is_none());
        assert!(!start_rest(&mut state));
        assert!(start_auto_battle(&mut state, &config, &mut rng).is_empty());
    }
}
