//! Core game state, configuration, timers, and the state-owning store.

pub mod commands;
pub mod config;
pub mod constants;
pub mod game_state;
pub mod offline;
pub mod store;
pub mod timers;

pub use commands::{parse_command, Command};
pub use config::GameConfig;
pub use game_state::{CombatLog, GameState};
pub use offline::OfflineReward;
pub use store::GameStore;
pub use timers::SessionClock;
