//! Snapshot storage backends.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{PersistenceError, Result};
pub use file::SaveManager;
pub use memory::MemoryStore;

use crate::core::game_state::GameState;

/// Where the store keeps its snapshot between sessions.
pub trait SnapshotStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<GameState>>;

    fn persist(&mut self, state: &GameState) -> Result<()>;

    /// Removes the saved snapshot. Erasing an empty store is not an error.
    fn erase(&mut self) -> Result<()>;
}
