//! Skirmish - idle stage-battler core.
//!
//! Combat resolution, wave and stage progression, loot, skills, and the
//! session timers, all behind a single state-owning [`GameStore`].

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod persistence;
pub mod skills;
pub mod stages;

pub use crate::core::{Command, GameConfig, GameState, GameStore};
pub use character::PlayerStats;
pub use combat::CombatEvent;
pub use persistence::{MemoryStore, SaveManager, SnapshotStore};
